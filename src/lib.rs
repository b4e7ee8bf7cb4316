//! # Chat API Library
//!
//! This crate provides the backend API service for the chat application:
//! - Application factory producing isolated, fully configured instances
//! - Dependency providers (database client, caller identity) behind traits
//! - Health check endpoint for deployment probes
//!
//! ## Architecture
//!
//! The crate follows a layered layout:
//!
//! - **Config**: layered settings snapshot loaded at startup
//! - **Auth**: credential schemes behind the `CurrentUserResolver` trait
//! - **Infrastructure**: Supabase REST client and its provider
//! - **Presentation**: HTTP routes, extractors, and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_api/
//! +-- config/         Configuration management
//! +-- auth/           Caller identity resolution schemes
//! +-- infrastructure/ Supabase client provider
//! +-- presentation/   HTTP routes, extractors, and middleware
//! +-- shared/         Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Authentication schemes and resolver
pub mod auth;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers and middleware
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
