pub use nestlist_diagnostics::{Diagnostic, Severity, Span, codes, explain};
