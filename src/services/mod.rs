pub mod challenges;
pub mod matches;
pub mod simulation;
pub mod tournaments;

pub use challenges::ChallengeResponse;
pub use matches::RecordingMode;
pub use simulation::SimulationService;
