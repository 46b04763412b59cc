//! # menu-advisor
//!
//! Ingests school lunch menus and suggests a home breakfast or dinner that
//! complements what was served at school.
//!
//! The crate has two halves:
//! - **Ingestion**: an uploaded document is classified by kind, run through
//!   the extractor for that kind, parsed into [`SchoolLunchMenu`] records and
//!   upserted into a shared [`MenuStore`](store::MenuStore).
//! - **Suggestion**: for a day and meal type, the school main dish is matched
//!   against an ordered list of keyword rules; the first rule that fires
//!   decides the home menu.
//!
//! ## Quick Start
//!
//! ```rust
//! use menu_advisor::MenuAdvisor;
//!
//! let advisor = MenuAdvisor::default();
//!
//! let upload = r#"[{
//!     "date": "2025-01-13T00:00:00Z",
//!     "main_dish": "鶏肉の照り焼き",
//!     "side_dishes": ["野菜炒め", "白米"],
//!     "soup": "味噌汁（わかめ）",
//!     "nutrition": {"calories": 650, "protein_g": 28.5}
//! }]"#;
//! let done = advisor
//!     .process_document(None, "january.json", &mut upload.as_bytes())
//!     .unwrap();
//! assert_eq!(done.menu_count, 1);
//!
//! let dinner = advisor.suggest_iso("2025-01-13", "dinner").unwrap();
//! assert_eq!(dinner.main_dish, "魚の煮付け");
//! assert_eq!(dinner.soup.as_deref(), Some("すまし汁"));
//! ```
//!
//! ## Failures keep their audit record
//!
//! ```rust
//! use menu_advisor::{error::ErrorKind, MenuAdvisor};
//!
//! let advisor = MenuAdvisor::default();
//! let err = advisor
//!     .process_document(None, "scan.pdf", &mut "%PDF-1.7".as_bytes())
//!     .unwrap_err();
//!
//! assert_eq!(err.kind(), ErrorKind::NotImplemented);
//! assert_eq!(err.document.status.as_str(), "error");
//! assert!(advisor.list_menus().is_empty());
//! ```

pub mod advisor;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod suggest;

pub use advisor::MenuAdvisor;
pub use config::AdvisorConfig;
pub use error::{AdvisorError, ErrorKind, ProcessingError, Result};
pub use model::{
    DocumentKind, DocumentSource, DocumentStatus, HomeMenuSuggestion, MealType, SchoolLunchMenu,
};
