pub mod observation_repository;

// Re-export all repositories for convenient access
pub use observation_repository::ObservationRepository;
