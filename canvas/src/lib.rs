//! Scene engine for the kinematic scene editor.
//!
//! Owns everything between raw pointer input and the rendering library: the
//! object registry, the orthographic camera and its coordinate mapping, the
//! hover/select/drag state machine, and fixed-step playback of solver frames
//! received over the streaming protocol. Drawing is delegated to a
//! [`render::Renderer`]; the host forwards input and solver messages and acts
//! on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Scene objects and the insertion-ordered registry |
//! | [`camera`] | Orthographic camera and screen ↔ scene conversions |
//! | [`input`] | Input event types and the interaction state |
//! | [`hit`] | Ray picking against cubes and spheres |
//! | [`queue`] | FIFO buffer of received frames |
//! | [`playback`] | Fixed-step clock that applies queued frames |
//! | [`protocol`] | Request/response handling for the solver stream |
//! | [`render`] | Renderer seam and an in-memory implementation |
//! | [`consts`] | Shared numeric constants (object sizes, zoom limits, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod playback;
pub mod protocol;
pub mod queue;
pub mod render;
