use anyhow::{Context, Result, bail};
use clap::Parser;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use subgrab::export::write_to;
use subgrab::languages::LANGUAGES;
use subgrab::{ExportFormat, FetchSession, FetchState, HttpCaptionService, HttpServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    subgrab::init_logging();
    let params = get_params()?;

    if params.list_languages {
        for lang in LANGUAGES {
            println!("{}\t{}", lang.code, lang.name);
        }
        return Ok(());
    }

    let Some(input) = params.input.as_deref() else {
        bail!("a YouTube link or video ID is required");
    };

    let service = HttpCaptionService::new(HttpServiceConfig {
        base_url: params.service_url.clone(),
        timeout: params.timeout_secs.map(Duration::from_secs),
    })?;

    let mut session = FetchSession::new(service);
    session.on_transition(|state| {
        if let FetchState::Pending { video_id, language } = state {
            eprintln!("Fetching {language} subtitles for {video_id}...");
        }
    });

    if let FetchState::Failed { message, .. } = session.submit(input, &params.language).await? {
        bail!("{message}");
    }

    let loaded = session
        .current()
        .context("fetch succeeded but no subtitles were loaded")?;
    eprintln!("{} ({})", loaded.summary(), loaded.language_name);

    if let Some(term) = params.search.as_deref() {
        let result = session.search(term);
        for hit in &result.hits {
            println!("[{}] {}", hit.entry.formatted_start(), hit.marked("*", "*"));
        }
        eprintln!("{} matching lines", result.len());
        return Ok(());
    }

    match params.output_dir {
        Some(dir) => {
            let path = session
                .write_export(&dir, params.format)
                .with_context(|| format!("failed to write export into '{}'", dir.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let writer = BufWriter::new(stdout.lock());
            write_to(session.subtitles(), params.format, writer)?;
            if params.format == ExportFormat::Txt {
                println!();
            }
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "subgrab")]
#[command(about = "Fetch, search and export YouTube subtitles")]
struct Params {
    /// YouTube link or 11-character video ID.
    #[arg(required_unless_present = "list_languages")]
    pub input: Option<String>,

    /// Preferred caption language code (e.g. `en`, `es`).
    #[arg(short = 'l', long = "lang", default_value = subgrab::languages::DEFAULT_LANGUAGE)]
    pub language: String,

    /// Base URL of the caption service.
    #[arg(short = 's', long = "service-url", default_value = "http://localhost:3000")]
    pub service_url: String,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = ExportFormat::Txt
    )]
    pub format: ExportFormat,

    /// Print only lines containing this text (case-insensitive), matches wrapped in `*`.
    #[arg(short = 'q', long = "search")]
    pub search: Option<String>,

    /// Write `subtitles_<id>.<ext>` into this directory instead of stdout.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Give up on the caption service after this many seconds.
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// List known caption languages and exit.
    #[arg(long = "list-languages", default_value_t = false)]
    pub list_languages: bool,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
