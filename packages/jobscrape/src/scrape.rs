//! Per-company scrape and relevance filter.

use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::detector::has_jobs;
use crate::error::{ScrapeError, ScrapeResult};
use crate::extractors::ExtractorRegistry;
use crate::fetcher::{PageFetcher, PageRequest};
use crate::models::{Company, JobPosting, JobsPageStatus};

/// A company whose scrape failed this run.
#[derive(Debug)]
pub struct CompanyFailure {
    pub company_name: String,
    pub error: ScrapeError,
}

/// Everything one pass over the companies produced.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// Relevant postings in company order
    pub relevant_jobs: Vec<(Company, JobPosting)>,
    /// Names of inactive companies
    pub skipped_companies: Vec<String>,
    /// Companies with no postings and no company-specific "no jobs" phrase
    pub verify_no_jobs: Vec<Company>,
    pub errors: Vec<CompanyFailure>,
}

/// Whether a title matches the company's own terms, or the global ones.
pub fn title_is_relevant(company: &Company, title: &str, search_terms: &[String]) -> bool {
    let terms = match &company.relevant_search_terms {
        Some(terms) if !terms.is_empty() => terms.as_slice(),
        _ => search_terms,
    };
    let title = title.to_lowercase();
    terms
        .iter()
        .any(|term| title.contains(&term.to_lowercase()))
}

/// Scrape one company's jobs page and keep the relevant postings.
pub async fn get_company_relevant_jobs(
    fetcher: &dyn PageFetcher,
    registry: &ExtractorRegistry,
    company: &Company,
    search_terms: &[String],
) -> ScrapeResult<(Vec<JobPosting>, JobsPageStatus)> {
    let request = PageRequest::for_company(company).ok_or_else(|| ScrapeError::MissingJobsPage {
        company: company.name.clone(),
    })?;
    let page = fetcher.fetch(&request).await?;

    let (company_has_jobs, mut status) = has_jobs(&page.text, company)?;
    if !company_has_jobs {
        return Ok((Vec::new(), status));
    }

    let spec = company
        .scraper
        .as_ref()
        .ok_or(ScrapeError::ScrapeNotImplemented)?;
    let extractor = registry.resolve(spec)?;
    let jobs = extractor.extract(&page)?;
    if !jobs.is_empty() {
        status = JobsPageStatus::SomeJobFound;
    }

    debug!(
        company = %company.name,
        extractor = extractor.name(),
        extracted = jobs.len(),
        "Jobs extracted"
    );

    let relevant = jobs
        .into_iter()
        .filter(|job| title_is_relevant(company, &job.title, search_terms))
        .collect();

    Ok((relevant, status))
}

/// Scrape every configured company.
///
/// A failing company is recorded in [`ScrapeReport::errors`] and never stops
/// the pass.
pub async fn get_relevant_jobs(
    fetcher: &dyn PageFetcher,
    registry: &ExtractorRegistry,
    config: &ScrapeConfig,
    limit_company: Option<&str>,
    additional_search_term: Option<&str>,
) -> ScrapeReport {
    let mut search_terms = config.search_terms.clone();
    // A blank term would match every title
    if let Some(term) = additional_search_term.filter(|term| !term.trim().is_empty()) {
        search_terms.push(term.to_string());
    }
    let limit = limit_company.map(str::to_lowercase);

    let mut report = ScrapeReport::default();

    for company in &config.companies {
        if let Some(limit) = &limit {
            if !company.name.to_lowercase().contains(limit) {
                continue;
            }
        }

        if !company.active {
            report.skipped_companies.push(company.name.clone());
            continue;
        }

        info!(company = %company.name, fetcher = fetcher.name(), "Checking company");
        match get_company_relevant_jobs(fetcher, registry, company, &search_terms).await {
            Ok((jobs, status)) => {
                if !jobs.is_empty() {
                    for job in jobs {
                        report.relevant_jobs.push((company.clone(), job));
                    }
                } else if status.needs_verification() {
                    report.verify_no_jobs.push(company.clone());
                }
            }
            Err(error) => {
                warn!(company = %company.name, error = %error, "Company scrape failed");
                report.errors.push(CompanyFailure {
                    company_name: company.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        relevant = report.relevant_jobs.len(),
        skipped = report.skipped_companies.len(),
        verify = report.verify_no_jobs.len(),
        errors = report.errors.len(),
        "Scrape pass complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockPageFetcher;
    use crate::models::ScraperSpec;

    fn terms(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn links_company(name: &str, url: &str) -> Company {
        Company::new(name)
            .with_jobs_page(url)
            .with_scraper(ScraperSpec::Links {
                href_contains: "/jobs/".to_string(),
            })
    }

    #[test]
    fn test_title_relevance_uses_global_terms() {
        let company = Company::new("Acme");
        let global = terms(&["engineer", "Developer"]);

        assert!(title_is_relevant(&company, "Senior ENGINEER", &global));
        assert!(title_is_relevant(&company, "web developer", &global));
        assert!(!title_is_relevant(&company, "Office Manager", &global));
    }

    #[test]
    fn test_company_terms_override_global_terms() {
        let company = Company::new("Acme").with_search_terms(&["rust"]);
        let global = terms(&["engineer"]);

        assert!(title_is_relevant(&company, "Rust Developer", &global));
        assert!(!title_is_relevant(&company, "Python Engineer", &global));
    }

    #[test]
    fn test_empty_company_terms_fall_back_to_global() {
        let company = Company::new("Acme").with_search_terms(&[]);
        assert!(title_is_relevant(&company, "Engineer", &terms(&["engineer"])));
    }

    #[tokio::test]
    async fn test_company_relevant_jobs() {
        let fetcher = MockPageFetcher::new().with_page(
            "https://acme.test/careers",
            r#"<body>
                <a href="/jobs/1">Backend Engineer</a>
                <a href="/jobs/2">Recruiter</a>
            </body>"#,
        );
        let company = links_company("Acme", "https://acme.test/careers");

        let (jobs, status) = get_company_relevant_jobs(
            &fetcher,
            &ExtractorRegistry::new(),
            &company,
            &terms(&["engineer"]),
        )
        .await
        .unwrap();

        assert_eq!(status, JobsPageStatus::SomeJobFound);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_no_jobs_page_skips_extraction() {
        let fetcher = MockPageFetcher::new().with_page(
            "https://acme.test/careers",
            "<body>Sorry, there are no openings right now.</body>",
        );
        // No scraper configured, but the page says there are no jobs
        let company = Company::new("Acme").with_jobs_page("https://acme.test/careers");

        let (jobs, status) = get_company_relevant_jobs(
            &fetcher,
            &ExtractorRegistry::new(),
            &company,
            &terms(&["engineer"]),
        )
        .await
        .unwrap();

        assert!(jobs.is_empty());
        assert_eq!(status, JobsPageStatus::GenericNoJobsPhraseFound);
    }

    #[tokio::test]
    async fn test_has_jobs_without_scraper_is_error() {
        let fetcher = MockPageFetcher::new()
            .with_page("https://acme.test/careers", "<body>Backend Engineer</body>");
        let company = Company::new("Acme").with_jobs_page("https://acme.test/careers");

        let err = get_company_relevant_jobs(
            &fetcher,
            &ExtractorRegistry::new(),
            &company,
            &terms(&["engineer"]),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Scrape not implemented");
    }

    #[tokio::test]
    async fn test_relevant_jobs_across_companies() {
        let fetcher = MockPageFetcher::new()
            .with_page(
                "https://acme.test/careers",
                r#"<body><a href="/jobs/1">Rust Engineer</a></body>"#,
            )
            .with_page(
                "https://quiet.test/careers",
                "<body>We don't currently have openings</body>",
            )
            .with_page(
                "https://specific.test/careers",
                "<body>Check back in spring</body>",
            )
            .with_page(
                "https://empty.test/careers",
                r#"<body><p>Join us!</p></body>"#,
            )
            .with_failure("https://broken.test/careers", "connection reset");

        let config = ScrapeConfig {
            search_terms: terms(&["engineer"]),
            companies: vec![
                links_company("Acme", "https://acme.test/careers"),
                links_company("Quiet", "https://quiet.test/careers"),
                links_company("Specific", "https://specific.test/careers")
                    .with_no_jobs_phrase("check back in spring"),
                links_company("Empty", "https://empty.test/careers"),
                links_company("Broken", "https://broken.test/careers"),
                links_company("Dormant", "https://dormant.test/careers").inactive(),
                Company::new("Unlisted"),
            ],
        };

        let report =
            get_relevant_jobs(&fetcher, &ExtractorRegistry::new(), &config, None, None).await;

        assert_eq!(report.relevant_jobs.len(), 1);
        assert_eq!(report.relevant_jobs[0].0.name, "Acme");

        let verify: Vec<_> = report.verify_no_jobs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(verify, vec!["Quiet", "Empty"]);

        assert_eq!(report.skipped_companies, vec!["Dormant"]);

        let failed: Vec<_> = report.errors.iter().map(|e| e.company_name.as_str()).collect();
        assert_eq!(failed, vec!["Broken", "Unlisted"]);
        assert!(!fetcher.was_fetched("https://dormant.test/careers"));
    }

    #[tokio::test]
    async fn test_limit_company_and_additional_term() {
        let fetcher = MockPageFetcher::new()
            .with_page(
                "https://acme.test/careers",
                r#"<body><a href="/jobs/1">Product Designer</a></body>"#,
            )
            .with_page(
                "https://other.test/careers",
                r#"<body><a href="/jobs/9">Product Designer</a></body>"#,
            );

        let config = ScrapeConfig {
            search_terms: terms(&["engineer"]),
            companies: vec![
                links_company("Acme Corp", "https://acme.test/careers"),
                links_company("Other", "https://other.test/careers"),
            ],
        };

        let report = get_relevant_jobs(
            &fetcher,
            &ExtractorRegistry::new(),
            &config,
            Some("ACME"),
            Some("designer"),
        )
        .await;

        assert_eq!(report.relevant_jobs.len(), 1);
        assert_eq!(report.relevant_jobs[0].1.title, "Product Designer");
        assert!(!fetcher.was_fetched("https://other.test/careers"));
        // The additional term must not leak into the loaded config
        assert_eq!(config.search_terms, terms(&["engineer"]));
    }

    #[tokio::test]
    async fn test_blank_additional_term_is_ignored() {
        let fetcher = MockPageFetcher::new().with_page(
            "https://acme.test/careers",
            r#"<body><a href="/jobs/1">Accountant</a></body>"#,
        );
        let config = ScrapeConfig {
            search_terms: terms(&["engineer"]),
            companies: vec![links_company("Acme", "https://acme.test/careers")],
        };

        for blank in ["", "   "] {
            let report =
                get_relevant_jobs(&fetcher, &ExtractorRegistry::new(), &config, None, Some(blank))
                    .await;

            assert!(report.relevant_jobs.is_empty());
            assert!(report.errors.is_empty());
        }
    }

    #[tokio::test]
    async fn test_bad_scraper_config_is_company_error() {
        let fetcher = MockPageFetcher::new()
            .with_page(
                "https://missing.test/careers",
                r#"<body><a href="/jobs/1">Rust Engineer</a></body>"#,
            )
            .with_page(
                "https://badcss.test/careers",
                r#"<body><ul><li>Rust Engineer</li></ul></body>"#,
            )
            .with_page(
                "https://acme.test/careers",
                r#"<body><a href="/jobs/1">Rust Engineer</a></body>"#,
            );

        let config = ScrapeConfig {
            search_terms: terms(&["engineer"]),
            companies: vec![
                Company::new("Missing")
                    .with_jobs_page("https://missing.test/careers")
                    .with_scraper(ScraperSpec::Custom {
                        name: "missing".to_string(),
                    }),
                Company::new("BadCss")
                    .with_jobs_page("https://badcss.test/careers")
                    .with_scraper(ScraperSpec::Selector {
                        item: "li[".to_string(),
                        title: None,
                        link: None,
                        id_attr: None,
                    }),
                links_company("Acme", "https://acme.test/careers"),
            ],
        };

        let report =
            get_relevant_jobs(&fetcher, &ExtractorRegistry::new(), &config, None, None).await;

        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].company_name, "Missing");
        assert!(matches!(
            &report.errors[0].error,
            ScrapeError::UnknownScraper { name } if name == "missing"
        ));
        assert_eq!(report.errors[1].company_name, "BadCss");
        assert!(matches!(
            report.errors[1].error,
            ScrapeError::InvalidSelector { .. }
        ));

        // The pass carries on to the healthy company
        assert_eq!(report.relevant_jobs.len(), 1);
        assert_eq!(report.relevant_jobs[0].0.name, "Acme");
    }
}
