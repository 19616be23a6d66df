// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Baton integration tests.
//!
//! Provides in-memory adapters for fast, deterministic tests without a cloud
//! drive or a survey platform account.
//!
//! # Components
//!
//! - [`MockRosterSource`] - Pending rosters with processed-move tracking
//! - [`MockSurveyPlatform`] - Surveys, collectors, messages, and recipients with a call log

pub mod mock_platform;
pub mod mock_roster;

pub use mock_platform::MockSurveyPlatform;
pub use mock_roster::MockRosterSource;
