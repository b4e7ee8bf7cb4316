//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Supabase REST client and its provider
//! - External API clients

pub mod supabase;
