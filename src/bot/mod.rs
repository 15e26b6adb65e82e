/// Command, callback and text handlers
pub mod handlers;
/// Inline menu actions and keyboard
pub mod menu;
/// Common messaging utilities (optional artwork)
pub mod messaging;
/// Captions, replies and administrator notices
pub mod views;
