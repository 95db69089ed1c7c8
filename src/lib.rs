//! Geometry and interaction engine for chart drawing tools.
//!
//! Drawings live in chart space (time, price) and are edited through screen space. Every tool
//! keeps a handful of real points; derived anchors such as midpoints, box corners or a
//! risk/reward target are computed from those points on demand. The host owns rendering,
//! hit-testing and persistence; it feeds pointer and key events into [`engine::EngineCore`]
//! together with the [`mapper::CoordinateMapper`] of the current frame and acts on the
//! returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event-driven [`engine::EngineCore`] and render items |
//! | [`scene`] | In-memory store of every tool on a chart |
//! | [`tool`] | One drawing: points, creation state, anchors, readouts |
//! | [`tools`] | Per-type rules (anchors, edits, shift locks, culling, normalization) |
//! | [`creation`] | Click-click / click-drag / freehand placement |
//! | [`shift`] | Shift-constraint resolution |
//! | [`culling`] | Viewport visibility of finite and extended geometry |
//! | [`store`] | Bounded point storage |
//! | [`geometry`] | Logical and screen points, viewport bounds |
//! | [`mapper`] | Chart-to-screen coordinate mapping |
//! | [`options`] | Default option bundles and typed option access |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`config`] | Environment-driven pixel thresholds |
//! | [`error`] | Error type for construction and configuration |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod creation;
pub mod culling;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mapper;
pub mod options;
pub mod scene;
pub mod shift;
pub mod store;
pub mod tool;
pub mod tools;

pub use engine::{Action, EngineCore, RenderItem};
pub use error::ToolError;
pub use tool::{Tool, ToolId};
pub use tools::ToolKind;
