// Debounce for the left hand's discrete commands.
// Time is passed in explicitly so a frame (and a test) decides what "now" is.

use crate::config::CooldownPolicy;
use std::time::{Duration, Instant};

/// Ready once `cooldown` has passed since the last reset. Never-reset counts as ready.
#[derive(Clone, Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    last: Option<Instant>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown, last: None }
    }

    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.cooldown,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// The discrete left-hand commands that go through a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Burst,
    Clear,
    NextBackground,
}

impl Command {
    const ALL: [Command; 3] = [Command::Burst, Command::Clear, Command::NextBackground];

    fn slot(self) -> usize {
        match self {
            Command::Burst => 0,
            Command::Clear => 1,
            Command::NextBackground => 2,
        }
    }
}

/// Gates for all commands, shared or one-per-command depending on policy.
#[derive(Clone, Debug)]
pub struct CommandGates {
    policy: CooldownPolicy,
    gates: [CooldownGate; 3],
}

impl CommandGates {
    pub fn new(policy: CooldownPolicy, cooldown: Duration) -> Self {
        Self { policy, gates: Command::ALL.map(|_| CooldownGate::new(cooldown)) }
    }

    fn slot(&self, cmd: Command) -> usize {
        match self.policy {
            CooldownPolicy::Shared => 0,
            CooldownPolicy::PerGesture => cmd.slot(),
        }
    }

    /// True when `cmd` may fire now.
    pub fn ready(&self, cmd: Command, now: Instant) -> bool {
        self.gates[self.slot(cmd)].ready(now)
    }

    /// Record that `cmd` fired at `now`.
    pub fn reset(&mut self, cmd: Command, now: Instant) {
        let slot = self.slot(cmd);
        self.gates[slot].reset(now);
    }
}
