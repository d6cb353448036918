//! Persistent per-company error tracking.
//!
//! A company that keeps failing should alert once, not on every run. The
//! previous run's failures are stored; only a company missing from that set
//! makes the run's errors notification-worthy.

use std::collections::HashSet;

use crate::models::CompanyError;
use crate::report::format_errors_message;
use crate::scrape::CompanyFailure;

/// What to do with stored errors after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorUpdate {
    /// Some company failed that was not failing before
    pub has_new_errors: bool,
    /// "All errors" body, present whenever this run had failures
    pub errors_message: Option<String>,
    /// Replacement for the stored errors; `None` leaves the store alone
    pub persist: Option<Vec<CompanyError>>,
}

/// Compare this run's failures with the stored ones.
pub fn track_errors(previous: &[CompanyError], current: &[CompanyFailure]) -> ErrorUpdate {
    if current.is_empty() {
        return ErrorUpdate {
            has_new_errors: false,
            errors_message: None,
            persist: (!previous.is_empty()).then(Vec::new),
        };
    }

    let previous_names: HashSet<&str> = previous
        .iter()
        .map(|error| error.company_name.as_str())
        .collect();

    let has_new_errors = current
        .iter()
        .any(|failure| !previous_names.contains(failure.company_name.as_str()));

    let persist = current
        .iter()
        .map(|failure| CompanyError {
            company_name: failure.company_name.clone(),
            message: failure.error.to_string(),
        })
        .collect();

    ErrorUpdate {
        has_new_errors,
        errors_message: Some(format_errors_message(current)),
        persist: Some(persist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;

    fn failure(company: &str) -> CompanyFailure {
        CompanyFailure {
            company_name: company.to_string(),
            error: ScrapeError::ScrapeNotImplemented,
        }
    }

    fn stored(company: &str) -> CompanyError {
        CompanyError {
            company_name: company.to_string(),
            message: "old message".to_string(),
        }
    }

    #[test]
    fn test_new_failure_is_new_error() {
        let update = track_errors(&[stored("Acme")], &[failure("Acme"), failure("Beta")]);

        assert!(update.has_new_errors);
        assert_eq!(
            update.errors_message.as_deref(),
            Some("All errors:\nAcme: Scrape not implemented\nBeta: Scrape not implemented")
        );
        let persisted = update.persist.unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].message, "Scrape not implemented");
    }

    #[test]
    fn test_repeat_failure_is_not_new() {
        let update = track_errors(&[stored("Acme"), stored("Beta")], &[failure("Acme")]);

        assert!(!update.has_new_errors);
        assert!(update.errors_message.is_some());
        // Beta recovered, so it drops out of the stored set
        assert_eq!(update.persist.unwrap(), vec![CompanyError {
            company_name: "Acme".to_string(),
            message: "Scrape not implemented".to_string(),
        }]);
    }

    #[test]
    fn test_recovery_clears_store() {
        let update = track_errors(&[stored("Acme")], &[]);

        assert!(!update.has_new_errors);
        assert!(update.errors_message.is_none());
        assert_eq!(update.persist, Some(Vec::new()));
    }

    #[test]
    fn test_nothing_before_nothing_now() {
        let update = track_errors(&[], &[]);
        assert_eq!(
            update,
            ErrorUpdate {
                has_new_errors: false,
                errors_message: None,
                persist: None,
            }
        );
    }
}
