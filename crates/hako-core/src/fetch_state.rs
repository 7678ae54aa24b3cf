//! Forecast fetch state machine.
//!
//! At most one fetch is current. Starting a new fetch supersedes the previous
//! one; a late response for a superseded ticket is reported as stale so the
//! caller can drop it.

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    area_code: String,
}

impl FetchTicket {
    pub fn area_code(&self) -> &str {
        &self.area_code
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Busy(FetchTicket),
}

/// Tracks the single in-flight forecast fetch.
#[derive(Debug, Default)]
pub struct FetchState {
    phase: Phase,
    next_generation: u64,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a fetch is outstanding (drives the busy indicator).
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy(_))
    }

    /// Area of the outstanding fetch, if any.
    pub fn pending_area(&self) -> Option<&str> {
        match &self.phase {
            Phase::Busy(ticket) => Some(ticket.area_code()),
            Phase::Idle => None,
        }
    }

    /// Issue a ticket for a new fetch, superseding any outstanding one.
    pub fn begin(&mut self, area_code: &str) -> FetchTicket {
        self.next_generation += 1;
        let ticket = FetchTicket {
            generation: self.next_generation,
            area_code: area_code.to_string(),
        };
        if let Phase::Busy(previous) = &self.phase {
            tracing::debug!(
                "Fetch for {} superseded by {}",
                previous.area_code,
                area_code
            );
        }
        self.phase = Phase::Busy(ticket.clone());
        ticket
    }

    /// Mark `ticket` complete. Returns true if it was the current fetch.
    pub fn finish(&mut self, ticket: &FetchTicket) -> bool {
        match &self.phase {
            Phase::Busy(current) if current == ticket => {
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }
}
