//! gen-ll: build the LL code tables from decomposition, map, frequency and word lists.
//!
//! ```bash
//! gen-ll --div ll_div.txt --map ll_map.txt --freq freq.txt \
//!   --words ll_words.txt --out-dir build --citi
//! ```
//!
//! Log verbosity follows `RUST_LOG`; the default is `info`, or `warn` with `--quiet`.

mod output;

use anyhow::{Context, Result};
use clap::Parser;
use ll_core::{BuildConfig, QuotaTable, WordEntry};
use ll_encoder::{EncoderInputs, EncoderPipeline};
use ll_tables::{
    read_char_freq, read_component_map, read_division_table, read_pinned, read_root_entries,
    validate_division_components, TableFile, TableRepository,
};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// LL code-table generator
#[derive(Parser, Debug)]
#[command(name = "gen-ll")]
#[command(about = "Generate LL input-method code tables")]
struct Args {
    /// Division table (`char\t[components,pinyin,set,codepoint]`)
    #[arg(long, env = "LL_DIV")]
    div: PathBuf,

    /// Component map (`code\tcomponent`)
    #[arg(long, env = "LL_MAP")]
    map: PathBuf,

    /// Character frequency list (`char\tfreq`)
    #[arg(long, env = "LL_FREQ")]
    freq: PathBuf,

    /// Word list (`word [weight]`)
    #[arg(long, env = "LL_WORDS")]
    words: Option<PathBuf>,

    /// Supplementary lexicon, abbreviated without placeholders
    #[arg(long, env = "LL_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Pinned candidates placed ahead of everything else (`text\tcode[\tfreq]`)
    #[arg(long, env = "LL_PINNED")]
    pinned: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "out", env = "LL_OUT_DIR")]
    out_dir: PathBuf,

    /// Char abbreviation quotas, e.g. `1:4,2:4,3:0,4:0`
    #[arg(long)]
    char_quotas: Option<String>,

    /// Word abbreviation quotas, e.g. `1:4,2:4,3:4,4:0`
    #[arg(long)]
    word_quotas: Option<String>,

    /// Lexicon abbreviation quotas
    #[arg(long)]
    lexicon_quotas: Option<String>,

    /// JSON build configuration; quota flags override its values
    #[arg(long, env = "LL_CONFIG")]
    config: Option<PathBuf>,

    /// Also write the merged candidate tables
    #[arg(long)]
    citi: bool,

    /// Size cap of the dazhu code table, in MiB
    #[arg(long, default_value = "30")]
    dazhu_max_mb: usize,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .init();
}

fn parse_quotas(flag: &str, raw: &str) -> Result<QuotaTable> {
    raw.parse().with_context(|| format!("invalid --{flag} `{raw}`"))
}

/// Configuration file first, then quota flags on top.
fn build_config(args: &Args) -> Result<BuildConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            BuildConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BuildConfig::default(),
    };
    if let Some(raw) = &args.char_quotas {
        config.char_quotas = parse_quotas("char-quotas", raw)?;
    }
    if let Some(raw) = &args.word_quotas {
        config.word_quotas = parse_quotas("word-quotas", raw)?;
    }
    if let Some(raw) = &args.lexicon_quotas {
        config.lexicon_quotas = parse_quotas("lexicon-quotas", raw)?;
    }
    config.validate()?;
    Ok(config)
}

/// Word list at `path`; a missing file only skips the words.
fn read_optional_words(repo: &TableRepository, kind: &str, path: Option<&Path>) -> Result<Option<Vec<WordEntry>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    match repo.read_optional(path)? {
        Some(text) => Ok(Some(ll_tables::readers::parse_words(&text))),
        None => {
            warn!(kind, path = %path.display(), "word list not found, skipping");
            Ok(None)
        }
    }
}

async fn write_tables(dir: &Path, tables: Vec<TableFile>) -> Result<usize> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    let mut set = JoinSet::new();
    for table in tables {
        let path = dir.join(table.name);
        set.spawn(async move {
            let lines = table.line_count();
            tokio::fs::write(&path, table.contents)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), lines, "table written");
            Ok::<_, anyhow::Error>(())
        });
    }

    let mut written = 0;
    while let Some(joined) = set.join_next().await {
        joined.context("writer task panicked")??;
        written += 1;
    }
    Ok(written)
}

async fn run(args: Args) -> Result<usize> {
    let config = build_config(&args)?;
    let pipeline = EncoderPipeline::new(config)?;

    let repo = TableRepository::new();
    let divisions = read_division_table(&repo, &args.div).context("loading division table")?;
    let mappings = read_component_map(&repo, &args.map).context("loading component map")?;
    let freqs = read_char_freq(&repo, &args.freq).context("loading frequency table")?;
    validate_division_components(&divisions, &mappings)?;

    let words = read_optional_words(&repo, "words", args.words.as_deref())?.unwrap_or_default();
    let lexicon = read_optional_words(&repo, "lexicon", args.lexicon.as_deref())?;
    let roots = read_root_entries(&repo, &args.map)?;
    info!(
        chars = divisions.len(),
        components = mappings.len(),
        words = words.len(),
        lexicon = lexicon.as_ref().map_or(0, Vec::len),
        "tables loaded"
    );

    let inputs = EncoderInputs {
        divisions,
        mappings,
        freqs,
        words,
        lexicon,
    };
    let encoded = pipeline.encode(&inputs)?;

    let mut tables = output::code_tables(&encoded, &roots);
    if args.citi {
        let pinned = match &args.pinned {
            Some(path) => read_pinned(&repo, path)?,
            None => Vec::new(),
        };
        let max_bytes = args.dazhu_max_mb.saturating_mul(1024 * 1024);
        tables.extend(output::candidate_tables(&pipeline, &encoded, &pinned, max_bytes));
    }

    let written = write_tables(&args.out_dir, tables).await?;
    info!(
        full = encoded.full.len(),
        simple = encoded.simple.len(),
        words = encoded.words.len(),
        word_simple = encoded.word_simple.len(),
        files = written,
        "done"
    );
    Ok(written)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet);
    run(args).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gen-ll", "--div", "d.txt", "--map", "m.txt", "--freq", "f.txt"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let a = args(&[]);
        assert_eq!(a.out_dir, PathBuf::from("out"));
        assert_eq!(a.dazhu_max_mb, 30);
        assert!(!a.citi);
        assert!(a.words.is_none());
    }

    #[test]
    fn test_quota_flags_override() {
        let config = build_config(&args(&["--char-quotas", "1:2,2:0", "--word-quotas", "1:3"])).unwrap();
        assert_eq!(config.char_quotas.quota(1), 2);
        assert_eq!(config.char_quotas.quota(2), 0);
        assert_eq!(config.word_quotas.quota(1), 3);
        assert_eq!(config.lexicon_quotas, BuildConfig::default().lexicon_quotas);
    }

    #[test]
    fn test_bad_quota_is_fatal() {
        assert!(build_config(&args(&["--word-quotas", "1-4"])).is_err());
        assert!(build_config(&args(&["--word-quotas", "1:40"])).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.json");
        std::fs::write(&path, r#"{"char_quotas": "1:1", "full_code_policy": "bare_leader"}"#).unwrap();
        let config = build_config(&args(&["--config", path.to_str().unwrap(), "--word-quotas", "1:2"])).unwrap();
        assert_eq!(config.char_quotas.quota(1), 1);
        assert_eq!(config.word_quotas.quota(1), 2);
        assert_eq!(config.full_code_policy, ll_core::SuffixPolicy::BareLeader);
    }

    #[tokio::test]
    async fn test_run_writes_tables() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("div.txt"), "呆\t[口木,dai,CJK,U+5446]\n杏\t[木口,xing,CJK,U+674F]\n口\t[口,kou,CJK,U+53E3]\n").unwrap();
        std::fs::write(root.join("map.txt"), "kou\t口\nmu\t木\n").unwrap();
        std::fs::write(root.join("freq.txt"), "口\t100\n呆\t20\n杏\t10\n").unwrap();
        std::fs::write(root.join("words.txt"), "杏口 5\n").unwrap();
        std::fs::write(root.join("pinned.txt"), "置顶\tzd\n").unwrap();
        let out = root.join("out");

        let a = Args::try_parse_from([
            "gen-ll",
            "--div",
            root.join("div.txt").to_str().unwrap(),
            "--map",
            root.join("map.txt").to_str().unwrap(),
            "--freq",
            root.join("freq.txt").to_str().unwrap(),
            "--words",
            root.join("words.txt").to_str().unwrap(),
            "--pinned",
            root.join("pinned.txt").to_str().unwrap(),
            "--out-dir",
            out.to_str().unwrap(),
            "--citi",
        ])
        .unwrap();
        let written = run(a).await.unwrap();
        assert_eq!(written, 10);

        let full = std::fs::read_to_string(out.join(output::CHARS_FULL)).unwrap();
        assert_eq!(full, "呆\tkmou\t20\n口\tkoou\t100\n杏\tmkuu\t10\n");
        let roots = std::fs::read_to_string(out.join(output::ROOTS)).unwrap();
        assert_eq!(roots, "口\t]kou\n木\t]mu\n");
        let genda = std::fs::read_to_string(out.join(output::CANDIDATES)).unwrap();
        assert!(genda.starts_with("置顶\tzd\n"));
        assert!(!out.join(output::LEXICON_FULL).exists());
    }

    #[tokio::test]
    async fn test_run_rejects_undefined_components() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("div.txt"), "呆\t[口木,dai,CJK,U+5446]\n").unwrap();
        std::fs::write(root.join("map.txt"), "kou\t口\n").unwrap();
        std::fs::write(root.join("freq.txt"), "").unwrap();
        let a = Args::try_parse_from([
            "gen-ll",
            "--div",
            root.join("div.txt").to_str().unwrap(),
            "--map",
            root.join("map.txt").to_str().unwrap(),
            "--freq",
            root.join("freq.txt").to_str().unwrap(),
            "--out-dir",
            root.join("out").to_str().unwrap(),
        ])
        .unwrap();
        let err = run(a).await.unwrap_err();
        assert!(err.to_string().contains("undefined components"));
    }
}
