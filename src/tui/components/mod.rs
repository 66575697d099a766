//! # TUI Components
//!
//! Stateless components take everything as props and are rebuilt each frame:
//! - `TitleBar`: app name, server, status, unseen-content marker
//! - `Message`: one transcript record
//! - `LoadingIndicator`: spinner while a request is in flight
//! - `LandingPage`: welcome screen before the first message
//!
//! Stateful components keep local state across frames and emit events:
//! - `InputBox`: text entry with submit hint
//! - `MessageList`: scrollable transcript with layout caching
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── loading.rs
//! ├── landing.rs
//! └── input_box/       (editor + wrap geometry)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod landing;
pub use landing::LandingPage;
pub mod loading;
pub use loading::LoadingIndicator;
