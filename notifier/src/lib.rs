//! # Carshare Notifier
//!
//! Outbound payment notifications.
//!
//! - [`HttpPaymentClient`]: delivers one [`PaymentNotice`](carshare_core::PaymentNotice)
//!   to `POST {base_url}/process`
//! - [`NotificationDispatcher`]: the `PaymentNotifier` handed to the reservation
//!   lifecycle. Notices go into a bounded queue and are delivered by a
//!   background loop with bounded concurrency and a per-delivery timeout.
//!
//! ## Example
//!
//! ```ignore
//! use carshare_notifier::{DispatcherConfig, HttpPaymentClient, NotificationDispatcher};
//!
//! let client = HttpPaymentClient::new("http://localhost:5000/payments", Duration::from_secs(5))?;
//! let (notifier, handle) = NotificationDispatcher::spawn(client, DispatcherConfig::default());
//!
//! let lifecycle = ReservationLifecycle::new(store, notifier);
//! // ... serve requests ...
//! handle.shutdown(Duration::from_secs(30)).await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod dispatcher;

pub use client::HttpPaymentClient;
pub use dispatcher::{DispatcherConfig, DispatcherHandle, NotificationDispatcher};
