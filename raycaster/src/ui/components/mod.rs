// Components for the UI system
mod debug_panel;
mod visual_options;

// Export components
pub use debug_panel::DebugPanel;
pub use visual_options::VisualOptionsPanel;
