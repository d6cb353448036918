//! Message formatting and the local console summary.

use colored::Colorize;

use crate::diff::NewJobs;
use crate::models::Company;
use crate::scrape::CompanyFailure;

/// Render new postings as a plain-text notification body.
///
/// ```text
///
/// Acme (https://acme.test/careers):
/// \t Backend Engineer https://acme.test/jobs/1
/// ```
pub fn format_new_jobs_message(new_jobs: &NewJobs) -> String {
    let mut message = String::new();
    for (company_name, group) in new_jobs {
        let jobs_page = group.company.jobs_page.as_deref().unwrap_or_default();
        message.push_str(&format!("\n{} ({}):\n", company_name, jobs_page));
        for job in &group.jobs {
            message.push_str(&format!(
                "\t {} {}\n",
                job.title.replace('\n', " "),
                job.link.as_deref().unwrap_or_default()
            ));
        }
    }
    message
}

fn error_lines(errors: &[CompanyFailure]) -> String {
    errors
        .iter()
        .map(|failure| format!("{}: {}", failure.company_name, failure.error))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render this run's failures as a notification body.
pub fn format_errors_message(errors: &[CompanyFailure]) -> String {
    format!("All errors:\n{}", error_lines(errors))
}

/// Build the local console summary, colored for a terminal.
pub fn console_summary(
    new_jobs: &NewJobs,
    verify_no_jobs: &[Company],
    errors: &[CompanyFailure],
) -> String {
    let mut sections = Vec::new();

    if !verify_no_jobs.is_empty() {
        let names = verify_no_jobs
            .iter()
            .map(|company| company.name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(
            format!("No jobs at all, but no specific no jobs phrase:\n{}", names)
                .blue()
                .to_string(),
        );
    }
    if !new_jobs.is_empty() {
        sections.push(format_new_jobs_message(new_jobs).green().to_string());
    }
    if !errors.is_empty() {
        sections.push(format!("Errors:\n{}", error_lines(errors)).red().to_string());
    }
    if new_jobs.is_empty() {
        sections.push("No new jobs".to_string());
    }

    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::models::{CompanyGroup, JobPosting};

    fn new_jobs() -> NewJobs {
        let mut new_jobs = NewJobs::new();
        new_jobs.insert(
            "Acme".to_string(),
            CompanyGroup {
                company: Company::new("Acme").with_jobs_page("https://acme.test/careers"),
                jobs: vec![
                    JobPosting::new("Backend\nEngineer", "1").with_link("https://acme.test/jobs/1"),
                    JobPosting::new("Data Engineer", "2"),
                ],
            },
        );
        new_jobs
    }

    fn errors() -> Vec<CompanyFailure> {
        vec![
            CompanyFailure {
                company_name: "Broken".to_string(),
                error: ScrapeError::ScrapeNotImplemented,
            },
            CompanyFailure {
                company_name: "Empty".to_string(),
                error: ScrapeError::EmptyPage {
                    company: "Empty".to_string(),
                },
            },
        ]
    }

    #[test]
    fn test_format_new_jobs_message() {
        assert_eq!(
            format_new_jobs_message(&new_jobs()),
            "\nAcme (https://acme.test/careers):\n\
             \t Backend Engineer https://acme.test/jobs/1\n\
             \t Data Engineer \n"
        );
    }

    #[test]
    fn test_format_errors_message() {
        assert_eq!(
            format_errors_message(&errors()),
            "All errors:\nBroken: Scrape not implemented\nEmpty: Empty: Error retrieving text"
        );
    }

    #[test]
    fn test_console_summary_sections() {
        colored::control::set_override(false);

        let summary = console_summary(&new_jobs(), &[Company::new("Quiet")], &errors());
        assert!(summary.starts_with("No jobs at all, but no specific no jobs phrase:\nQuiet"));
        assert!(summary.contains("Acme (https://acme.test/careers):"));
        assert!(summary.contains("Errors:\nBroken: Scrape not implemented"));
        assert!(!summary.contains("No new jobs"));

        let summary = console_summary(&NewJobs::new(), &[], &[]);
        assert_eq!(summary, "No new jobs");
    }
}
