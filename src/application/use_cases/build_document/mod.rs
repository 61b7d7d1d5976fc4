use crate::application::dto::{DocumentRequest, ScanInput};
use crate::application::read_models::{
    DescriptorView, DistributionView, Document, IgnoredMatchView, MatchView, MatchViewBuilder,
    SourceView,
};
use crate::ports::inbound::DocumentAssemblyPort;
use crate::ports::outbound::{ProgressReporter, VulnerabilityMetadataProvider};
use crate::scan_report::domain::{index_by_id, Package, PackageId, ScanContext};
use crate::scan_report::services::DistroSelector;
use crate::shared::error::ReportError;
use crate::shared::Result;
use chrono::{DateTime, Datelike, Local, SecondsFormat, TimeZone};
use std::collections::HashMap;
use std::fmt::Display;

/// BuildDocumentUseCase - Assembles the report document for a scan
///
/// Pure with respect to its inputs apart from the clock: the same scan,
/// metadata and request always produce the same matches in the same order.
///
/// # Type Parameters
/// * `P` - VulnerabilityMetadataProvider implementation
/// * `R` - ProgressReporter implementation
pub struct BuildDocumentUseCase<P, R> {
    metadata_provider: P,
    progress_reporter: R,
}

impl<P, R> BuildDocumentUseCase<P, R>
where
    P: VulnerabilityMetadataProvider,
    R: ProgressReporter,
{
    /// Creates a new BuildDocumentUseCase with injected dependencies
    pub fn new(metadata_provider: P, progress_reporter: R) -> Self {
        Self {
            metadata_provider,
            progress_reporter,
        }
    }

    /// Executes the document assembly
    ///
    /// # Errors
    /// Fails fast with the first [`ReportError`] encountered; no partial
    /// document is ever returned.
    pub fn execute(&self, input: &ScanInput, request: &DocumentRequest) -> Result<Document> {
        let packages = index_by_id(&input.packages);

        // Step 1: Present matches in canonical order
        let mut matches = self.build_matches(input, &packages)?;

        // Step 2: Present ignored matches with the rules that suppressed them
        let ignored_matches = self.build_ignored_matches(input, &packages)?;

        // Step 3: Source and distro
        let source = Self::build_source(&input.context())?;
        let distro = Self::build_distribution(&input.packages);

        // Step 4: Apply the requested ordering once every view exists
        request.sort_strategy.sort(&mut matches);

        // Step 5: Descriptor
        let descriptor = DescriptorView {
            name: request.tool.name.clone(),
            version: request.tool.version.clone(),
            configuration: request.configuration.clone(),
            db: input.db.clone(),
            timestamp: Self::timestamp()?,
        };

        self.progress_reporter.report_completion(&format!(
            "Assembled report with {} match(es), {} ignored",
            matches.len(),
            ignored_matches.as_ref().map_or(0, Vec::len)
        ));

        Ok(Document {
            matches,
            ignored_matches,
            source,
            distro,
            descriptor,
        })
    }

    fn build_matches(
        &self,
        input: &ScanInput,
        packages: &HashMap<&PackageId, &Package>,
    ) -> Result<Vec<MatchView>> {
        let total = input.matches.len();
        self.progress_reporter
            .report(&format!("🔍 Resolving metadata for {} match(es)", total));

        let mut views = Vec::with_capacity(total);
        for (index, m) in input.matches.sorted().enumerate() {
            let view = MatchViewBuilder::build(m, packages, &self.metadata_provider)
                .inspect_err(|_| self.report_abort("match", index + 1, total))?;
            views.push(view);
            self.progress_reporter
                .report_progress(index + 1, total, Some(m.vulnerability.id()));
        }
        Ok(views)
    }

    fn build_ignored_matches(
        &self,
        input: &ScanInput,
        packages: &HashMap<&PackageId, &Package>,
    ) -> Result<Option<Vec<IgnoredMatchView>>> {
        if input.ignored_matches.is_empty() {
            return Ok(None);
        }

        self.progress_reporter.report(&format!(
            "🙈 Resolving metadata for {} ignored match(es)",
            input.ignored_matches.len()
        ));

        let total = input.ignored_matches.len();
        let views = input
            .ignored_matches
            .iter()
            .enumerate()
            .map(|(index, ignored)| {
                MatchViewBuilder::build_ignored(ignored, packages, &self.metadata_provider)
                    .inspect_err(|_| self.report_abort("ignored match", index + 1, total))
            })
            .collect::<std::result::Result<Vec<_>, ReportError>>()?;
        Ok(Some(views))
    }

    /// Clears any progress display before the error propagates to the caller
    fn report_abort(&self, what: &str, position: usize, total: usize) {
        self.progress_reporter.report_error(&format!(
            "⚠️  Report assembly stopped at {} {}/{}",
            what, position, total
        ));
    }

    fn build_source(context: &ScanContext) -> Result<Option<SourceView>> {
        context
            .source
            .as_ref()
            .map(|source| SourceView::try_from(&source.metadata))
            .transpose()
            .map_err(Into::into)
    }

    fn build_distribution(packages: &[Package]) -> DistributionView {
        DistributionView::from(DistroSelector::select_most_common(packages))
    }

    fn timestamp() -> Result<String> {
        Ok(format_timestamp(Local::now())?)
    }
}

/// RFC 3339 text with sub-second digits only when needed and `Z` for UTC
///
/// # Errors
/// `ReportError::Timestamp` when the year has no four-digit RFC 3339 form
fn format_timestamp<Tz>(at: DateTime<Tz>) -> std::result::Result<String, ReportError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let year = at.year();
    if !(0..=9999).contains(&year) {
        return Err(ReportError::Timestamp {
            details: format!("year {} is outside the range [0,9999]", year),
        });
    }
    Ok(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

impl<P, R> DocumentAssemblyPort for BuildDocumentUseCase<P, R>
where
    P: VulnerabilityMetadataProvider,
    R: ProgressReporter,
{
    fn assemble(&self, input: &ScanInput, request: &DocumentRequest) -> Result<Document> {
        self.execute(input, request)
    }
}

#[cfg(test)]
mod tests;
