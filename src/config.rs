/// Run-time switches of a [`crate::api::Shuffler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleConfig {
    /// Replay the plan on a fresh tracker and reject it unless it ends in the
    /// target order. Runs before any external call.
    pub verify_plan: bool,

    /// Compute the plan but never call the range-move primitive.
    pub dry_run: bool,
}

impl ShuffleConfig {
    pub fn new() -> Self {
        Self {
            verify_plan: true,
            dry_run: false,
        }
    }

    pub fn with_verify_plan(mut self, verify_plan: bool) -> Self {
        self.verify_plan = verify_plan;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self::new()
    }
}
