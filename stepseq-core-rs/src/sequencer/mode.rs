/// Policy that decides the next step on every gated tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TraversalMode {
    /// `0, 1, 2, … n-1, 0, …`
    #[default]
    Forward,
    /// `n-1, … 1, 0, n-1, …`
    Reverse,
    /// Bounce between the first and last step.
    PingPong,
    /// Uniformly random step, repeats allowed.
    Random,
}

impl TraversalMode {
    /// All modes in button-cycle order.
    pub const ALL: [TraversalMode; 4] = [
        TraversalMode::Forward,
        TraversalMode::Reverse,
        TraversalMode::PingPong,
        TraversalMode::Random,
    ];

    /// The mode selected by the next press of the mode button.
    pub fn next(self) -> Self {
        match self {
            TraversalMode::Forward => TraversalMode::Reverse,
            TraversalMode::Reverse => TraversalMode::PingPong,
            TraversalMode::PingPong => TraversalMode::Random,
            TraversalMode::Random => TraversalMode::Forward,
        }
    }

    /// Short label for log output.
    pub fn name(self) -> &'static str {
        match self {
            TraversalMode::Forward => "Forward",
            TraversalMode::Reverse => "Reverse",
            TraversalMode::PingPong => "PingPong",
            TraversalMode::Random => "Random",
        }
    }
}
