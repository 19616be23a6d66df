// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the two remote collaborators.
//!
//! Both traits use `#[async_trait]` so the engine can hold them as
//! `Arc<dyn ...>` handles.

pub mod roster_source;
pub mod survey_platform;

pub use roster_source::RosterSource;
pub use survey_platform::SurveyPlatform;
