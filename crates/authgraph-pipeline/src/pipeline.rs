//! The authority-file pipeline: every stage wired to its requirements.

use authgraph_core::config::AuthgraphConfig;
use authgraph_core::constants::{DEFAULT_DECOMPRESS_TOOL, DEFAULT_DOWNLOAD_TOOL};
use authgraph_core::errors::PipelineError;
use authgraph_core::types::FxHashMap;
use chrono::NaiveDate;

use crate::artifact::ArtifactStore;
use crate::engine::{Engine, ExecutionReport};
use crate::graph::{StageGraph, StageId};
use crate::stage::Stage;
use crate::stages::{
    DumpDownload, DumpExtract, Executable, HumanReadableRank, PreferredNames, RankComputation,
    Reach, RecordDatabase, SameAs, Successor, SuccessorDatabase, TranslateRank,
    TranslatedSuccessor, TranslatedSuccessorCompact, TranslationMap,
};

/// Stages that nothing else requires; building them builds everything.
pub const TERMINAL_STAGES: [&str; 4] = [
    "human-readable-rank",
    "reach",
    "same-as",
    "successor-database",
];

/// The assembled stage graph for one dump date.
pub struct AuthorityPipeline {
    graph: StageGraph,
    date: NaiveDate,
    by_kind: FxHashMap<&'static str, StageId>,
}

impl AuthorityPipeline {
    /// Assemble for today's dump.
    pub fn assemble_today(config: &AuthgraphConfig) -> Result<Self, PipelineError> {
        Self::assemble(config, chrono::Local::now().date_naive())
    }

    pub fn assemble(config: &AuthgraphConfig, date: NaiveDate) -> Result<Self, PipelineError> {
        AuthgraphConfig::validate(config)?;

        let mut builder = Builder {
            graph: StageGraph::new(ArtifactStore::from_config(&config.store)),
            by_kind: FxHashMap::default(),
        };
        let source = &config.source;
        let extraction = &config.extraction;
        let batch_size = extraction.effective_batch_size();

        let download_tool = source.effective_download_tool();
        let decompress_tool = source.effective_decompress_tool();
        let rank_tool = config.rank.effective_executable();

        let has_download = builder.capability(Executable::new(
            &download_tool,
            format!("Install {DEFAULT_DOWNLOAD_TOOL} or set source.download_tool."),
        ))?;
        let has_decompress = builder.capability(Executable::new(
            &decompress_tool,
            format!("Install {DEFAULT_DECOMPRESS_TOOL} or set source.decompress_tool."),
        ))?;
        let has_rank =
            builder.capability(Executable::new(&rank_tool, config.rank.effective_hint()))?;

        let download = builder.artifact(
            DumpDownload {
                date,
                url: source.effective_dump_url(),
                tool: download_tool,
            },
            &[has_download],
        )?;
        let extract = builder.artifact(
            DumpExtract {
                date,
                tool: decompress_tool,
            },
            &[download, has_decompress],
        )?;
        let records = builder.artifact(
            RecordDatabase {
                date,
                subject_pattern: extraction.effective_subject_pattern().to_string(),
            },
            &[extract],
        )?;
        builder.artifact(
            SameAs {
                date,
                pattern: extraction.effective_same_as_pattern().to_string(),
                batch_size,
            },
            &[records],
        )?;
        let successor = builder.artifact(
            Successor {
                date,
                pattern: extraction.effective_successor_pattern().to_string(),
                batch_size,
            },
            &[records],
        )?;
        builder.artifact(SuccessorDatabase { date }, &[successor])?;
        builder.artifact(Reach { date }, &[successor])?;
        let map = builder.artifact(TranslationMap { date }, &[records])?;
        let translated = builder.artifact(TranslatedSuccessor { date }, &[successor, map])?;
        let compact = builder.artifact(TranslatedSuccessorCompact { date }, &[translated])?;
        let rank = builder.artifact(
            RankComputation {
                date,
                executable: rank_tool,
            },
            &[compact, has_rank],
        )?;
        let translated_rank = builder.artifact(TranslateRank { date }, &[map, rank])?;
        let names = builder.artifact(
            PreferredNames {
                date,
                pattern: extraction.effective_preferred_name_pattern().to_string(),
                batch_size,
            },
            &[records],
        )?;
        builder.artifact(HumanReadableRank { date }, &[translated_rank, names])?;

        let Builder { graph, by_kind } = builder;
        tracing::debug!(stages = graph.len(), %date, "pipeline assembled");
        Ok(Self {
            graph,
            date,
            by_kind,
        })
    }

    pub fn graph(&self) -> &StageGraph {
        &self.graph
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Id of the artifact stage of `kind`, e.g. `"reach"`.
    pub fn stage(&self, kind: &str) -> Option<StageId> {
        self.by_kind.get(kind).copied()
    }

    pub fn require_stage(&self, kind: &str) -> Result<StageId, PipelineError> {
        self.stage(kind)
            .ok_or_else(|| PipelineError::UnknownKind(kind.to_string()))
    }

    /// Build one stage and its requirements; stage failures become errors.
    pub fn execute(
        &self,
        engine: &Engine,
        kind: &str,
    ) -> Result<ExecutionReport, PipelineError> {
        let target = self.require_stage(kind)?;
        engine.execute(&self.graph, target)?.into_result()
    }

    /// Build every terminal stage.
    pub fn execute_all(&self, engine: &Engine) -> Result<Vec<ExecutionReport>, PipelineError> {
        TERMINAL_STAGES
            .iter()
            .map(|kind| self.execute(engine, kind))
            .collect()
    }
}

struct Builder {
    graph: StageGraph,
    by_kind: FxHashMap<&'static str, StageId>,
}

impl Builder {
    fn capability(&mut self, stage: Executable) -> Result<StageId, PipelineError> {
        self.graph.add(stage, &[])
    }

    fn artifact<S: Stage + 'static>(
        &mut self,
        stage: S,
        requires: &[StageId],
    ) -> Result<StageId, PipelineError> {
        let kind = stage.kind();
        let id = self.graph.add(stage, requires)?;
        self.by_kind.insert(kind, id);
        Ok(id)
    }
}
