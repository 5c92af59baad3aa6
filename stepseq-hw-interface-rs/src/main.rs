//! stepseq-hw-interface
//!
//! MIDI-clocked eight-step sequencer firmware for the Raspberry Pi Pico 2.
//! Wires the `stepseq` state machine and the `gate-driver` outputs into a
//! live loop:
//!
//! 1. MIDI realtime bytes arrive on UART0 RX at 31 250 baud.
//! 2. The MIDI task classifies each byte and queues Tick / Start / Stop
//!    events on the `TRANSPORT` channel.
//! 3. The control task wakes every millisecond, reads both pots, drains the
//!    channel into the sequencer, polls the mode button, and switches the
//!    pulse LED off once its deadline passes.
//!
//! All sequencer state lives inside the control task; the channel is the
//! only thing shared between tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{self, UartRx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use tinyrand::{Seeded, Wyrand};
use {defmt_rtt as _, panic_probe as _};

use gate_driver::GateOutputs;
use stepseq::analog::{self, ControlInputs};
use stepseq::button::DebouncedButton;
use stepseq::midi::{MidiTransportParser, TransportEvent};
use stepseq::sequencer::{Controller, SequencerConfig, NUM_STEPS};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    UART0_IRQ => uart::InterruptHandler<UART0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// ---------------------------------------------------------------------------
// Constants and static storage
// ---------------------------------------------------------------------------

/// MIDI DIN baud rate.
const MIDI_BAUD: u32 = 31_250;

/// Control loop period. Well below the 8 ms tick spacing of 24 PPQN at
/// 300 BPM.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Transport events waiting for the control loop. 64 entries covers more
/// than 20 ms of back-to-back realtime bytes.
static TRANSPORT: Channel<CriticalSectionRawMutex, TransportEvent, 64> = Channel::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete gate driver: eight step outputs plus the pulse LED.
type Gates = GateOutputs<Output<'static>, Output<'static>, NUM_STEPS>;

/// Concrete MIDI receiver.
type MidiRx = UartRx<'static, UART0, uart::Async>;

/// Potentiometer inputs sampled by the control loop.
struct Pots {
    adc: Adc<'static, adc::Async>,
    step_count: adc::Channel<'static>,
    division: adc::Channel<'static>,
}

impl Pots {
    /// Read both pots as 10-bit values. A failed conversion keeps the
    /// previous mapping for that control.
    async fn read(&mut self, previous: ControlInputs) -> ControlInputs {
        let mut inputs = previous;

        match self.adc.read(&mut self.step_count).await {
            Ok(raw) => inputs.step_count = analog::step_count_from_reading(analog::from_12bit(raw)),
            Err(e) => warn!("Step-count pot read failed: {}", e),
        }
        match self.adc.read(&mut self.division).await {
            Ok(raw) => {
                inputs.division_index = analog::division_index_from_reading(analog::from_12bit(raw))
            }
            Err(e) => warn!("Division pot read failed: {}", e),
        }

        inputs
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// MIDI receive task.
///
/// Reads one byte at a time so realtime bytes are forwarded as soon as they
/// arrive. Non-transport bytes are dropped here.
#[embassy_executor::task]
async fn midi_rx_task(mut rx: MidiRx) {
    info!("MIDI receive task started");

    let mut parser = MidiTransportParser::new();
    let mut byte = [0u8; 1];

    loop {
        if let Err(e) = rx.read(&mut byte).await {
            // Framing / overrun errors: the byte is lost, keep listening.
            warn!("MIDI UART error: {}", e);
            continue;
        }

        if let Some(event) = parser.feed(byte[0]) {
            if TRANSPORT.try_send(event).is_err() {
                warn!("Transport queue full, {} dropped", event);
            }
        }
    }
}

/// Cooperative control loop. The only place sequencer state is mutated.
#[embassy_executor::task]
async fn control_task(
    mut controller: Controller<Gates, Wyrand>,
    mut pots: Pots,
    button: Input<'static>,
    config: SequencerConfig,
) {
    info!("Control task started");

    let mut mode_button = DebouncedButton::new(config.debounce_ms);
    let mut inputs = ControlInputs::default();

    loop {
        inputs = pots.read(inputs).await;
        let now = Instant::now().as_millis();

        while let Ok(event) = TRANSPORT.try_receive() {
            if let Err(e) = controller.on_transport(event, inputs, now) {
                error!("Gate update failed on {}: {}", event, e);
            }
        }

        // Active-low: pressed pulls the pin to ground.
        if mode_button.update(button.is_low(), now) {
            if let Err(e) = controller.on_press(now) {
                error!("Gate update failed on button press: {}", e);
            }
        }

        if let Err(e) = controller.service(now) {
            error!("Pulse LED update failed: {}", e);
        }

        Timer::after(POLL_INTERVAL).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("stepseq-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // MIDI_IN  → GP1   (UART0 RX)
    // GATE_0-7 → GP2 … GP9
    // PULSE    → GP25  (on-board LED)
    // MODE_BTN → GP15  active-low, pull-up enabled
    // STEPS    → GP26  (ADC0)
    // DIVISION → GP27  (ADC1)
    // ———————————————————————————————————————————————————————————————————————

    let config = SequencerConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid sequencer config: {}", e);
    }

    // MIDI input. Only RX is wired; the sequencer never transmits.
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = MIDI_BAUD;
    let midi_rx = UartRx::new(p.UART0, p.PIN_1, Irqs, p.DMA_CH0, uart_config);

    // Gate outputs, constructed low.
    let step_pins = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    ];
    let pulse_led = Output::new(p.PIN_25, Level::Low);
    let mut gates = GateOutputs::new(step_pins, pulse_led);
    if let Err(e) = gates.init() {
        error!("Gate init failed: {}", e);
    }

    // Pots.
    let mut pots = Pots {
        adc: Adc::new(p.ADC, Irqs, adc::Config::default()),
        step_count: adc::Channel::new_pin(p.PIN_26, Pull::None),
        division: adc::Channel::new_pin(p.PIN_27, Pull::None),
    };

    // Seed the Random mode from pot noise so power cycles differ.
    let mut seed = config.rng_seed ^ Instant::now().as_ticks();
    for shift in [0u32, 12, 24, 36] {
        if let Ok(raw) = pots.adc.read(&mut pots.step_count).await {
            seed ^= u64::from(raw) << shift;
        }
        if let Ok(raw) = pots.adc.read(&mut pots.division).await {
            seed ^= u64::from(raw) << (shift + 6);
        }
    }
    debug!("Random seed {=u64:x}", seed);

    let button = Input::new(p.PIN_15, Pull::Up);
    let controller = Controller::new(&config, gates, Wyrand::seed(seed));

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(midi_rx_task(midi_rx)).unwrap();
    spawner.spawn(control_task(controller, pots, button, config)).unwrap();

    info!("All tasks spawned");
}
