use crate::artifact::{extract_matching, merge_unique, Artifact, ArtifactStore};
use crate::config::Config;
use crate::external::{tools, StageExecutor, StageResult};
use crate::output::console;

use super::stage::{Stage, StageKind};

/// What a run produced: one result per external invocation and the line
/// count of every merge or filter output.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub results: Vec<StageResult>,
    pub counts: Vec<(Artifact, usize)>,
}

impl PipelineReport {
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded()).count()
    }

    pub fn count(&self, artifact: Artifact) -> Option<usize> {
        self.counts.iter().rev().find(|(a, _)| *a == artifact).map(|(_, n)| *n)
    }
}

/// The fixed, linear stage sequence over one artifact store.
pub struct Pipeline {
    store: ArtifactStore,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(store: ArtifactStore, stages: Vec<Stage>) -> Self {
        Self { store, stages }
    }

    pub fn standard(domain: &str, store: ArtifactStore, config: &Config) -> Self {
        let p = |a: Artifact| store.path(a);
        let stages = vec![
            Stage::command(1, "Subdomain discovery", tools::subfinder(domain, &p(Artifact::SubfinderRaw)))
                .writes(Artifact::SubfinderRaw),
            Stage::command(1, "Subdomain discovery", tools::assetfinder(domain, &p(Artifact::AssetsRaw)))
                .writes(Artifact::AssetsRaw),
            Stage::new(
                2,
                "Merge & deduplicate",
                StageKind::Merge {
                    inputs: vec![Artifact::SubfinderRaw, Artifact::AssetsRaw],
                    output: Artifact::Subdomains,
                },
            ),
            Stage::command(3, "Live check", tools::httpx_live(&p(Artifact::Subdomains), &p(Artifact::Live)))
                .reads(Artifact::Subdomains)
                .writes(Artifact::Live),
            Stage::command(4, "Detailed scan", tools::httpx_status(&p(Artifact::Subdomains), &p(Artifact::Status)))
                .reads(Artifact::Subdomains)
                .writes(Artifact::Status),
            Stage::command(5, "Subdomain takeover check", tools::subzy(&p(Artifact::Subdomains)))
                .reads(Artifact::Subdomains),
            Stage::command(6, "Crawling", tools::katana(&p(Artifact::Live), &p(Artifact::Crawl)))
                .reads(Artifact::Live)
                .writes(Artifact::Crawl),
            Stage::new(
                7,
                "JS extraction",
                StageKind::Filter {
                    input: Artifact::Crawl,
                    output: Artifact::ScriptUrls,
                    needle: config.script_filter.clone(),
                },
            ),
            Stage::new(
                8,
                "Secret analysis",
                StageKind::ScanEach {
                    input: Artifact::ScriptUrls,
                    interpreter: config.interpreter.clone(),
                    script: config.script_path(),
                },
            ),
        ];
        Self::new(store, stages)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Run every stage in order, each one only after the previous returned.
    pub async fn run(&self, executor: &dyn StageExecutor) -> PipelineReport {
        let mut report = PipelineReport::default();

        for stage in &self.stages {
            tracing::info!(step = stage.step, title = stage.title, "stage started");
            match &stage.kind {
                StageKind::Command { invocation, .. } => {
                    console::info(format!("Running: {}...", invocation.tool));
                    let result = executor.execute(invocation).await;
                    announce(&result);
                    report.results.push(result);
                }
                StageKind::Merge { inputs, output } => {
                    console::warn("Merging files and removing duplicates...");
                    let paths: Vec<_> = inputs.iter().map(|a| self.store.path(*a)).collect();
                    let target = self.store.path(*output);
                    let count = match merge_unique(&paths, &target) {
                        Ok(n) => {
                            console::success(format!("Total Unique Subdomains: {n} -> Saved to {}", target.display()));
                            n
                        }
                        Err(e) => {
                            console::error(format!("Merge failed: {e}"));
                            0
                        }
                    };
                    report.counts.push((*output, count));
                }
                StageKind::Filter { input, output, needle } => {
                    console::warn(format!("Extracting {needle} files from crawl data..."));
                    let target = self.store.path(*output);
                    let count = match extract_matching(&self.store.path(*input), &target, needle) {
                        Ok(n) => {
                            console::success(format!("Found {n} {needle} files -> Saved to {}", target.display()));
                            n
                        }
                        Err(e) => {
                            console::error(format!("Extraction failed: {e}"));
                            0
                        }
                    };
                    report.counts.push((*output, count));
                }
                StageKind::ScanEach { input, interpreter, script } => {
                    console::warn("Starting SecretFinder...");
                    if !script.exists() {
                        console::error(format!("ERROR: '{}' not found.", script.display()));
                        continue;
                    }
                    let urls = match self.store.read_lines(*input) {
                        Ok(lines) => lines,
                        Err(e) => {
                            console::error(format!("Cannot read {input}: {e}"));
                            continue;
                        }
                    };
                    for url in urls.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
                        println!("   > Analyzing: {url}");
                        let result = executor.execute(&tools::secret_finder(interpreter, script, url)).await;
                        if !result.succeeded() {
                            announce(&result);
                        }
                        report.results.push(result);
                    }
                }
            }
            // Failures are reported above and never end the run: the next
            // stage starts whatever this one returned.
        }

        tracing::info!(
            invocations = report.results.len(),
            failed = report.failed_count(),
            "pipeline finished"
        );
        report
    }
}

fn announce(result: &StageResult) {
    match &result.error {
        None => console::success(format!("{} completed.", result.tool)),
        Some(detail) => console::error(format!("Error ({}): {detail}", result.tool)),
    }
}
