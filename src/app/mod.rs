// Application layer - Use case interactors and the editor session

pub mod container;
pub mod export_interactor;
pub mod load_interactor;
pub mod session;

// Re-export interactors
pub use export_interactor::ExportInteractor;
pub use load_interactor::LoadInteractor;
pub use session::EditorSession;
