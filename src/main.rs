use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use stereo_script::config::SynthConfig;
use stereo_script::domain::entities::Channel;
use stereo_script::infrastructure::audio::{decode_mono, encode};
use stereo_script::infrastructure::compositor::{ChannelGains, pan};
use stereo_script::pipeline::{prepare, synthesize, synthesize_or_passthrough};
use tracing::info;

#[derive(Parser)]
#[command(name = "stereo-script", about = "Route tagged TTS script segments to stereo channels")]
struct Cli {
    /// TOML file with weight constants and output sample rate
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the clean text and segment list as JSON
    Prepare {
        #[arg(long)]
        script: PathBuf,
    },
    /// Render one script + mono WAV pair to a stereo WAV
    Render {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        audio: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Fail instead of writing the mono source when rendering fails
        #[arg(long)]
        strict: bool,
    },
    /// Render every NAME.txt / NAME.wav pair in a directory
    Batch {
        #[arg(long)]
        jobs: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Apply a constant left/right balance to a whole mono WAV
    Pan(PanArgs),
}

#[derive(Args)]
struct PanArgs {
    #[arg(long)]
    audio: PathBuf,
    #[arg(long)]
    output: PathBuf,
    #[arg(long, conflicts_with = "focus")]
    wide: bool,
    #[arg(long)]
    focus: Option<Side>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Left,
    Right,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SynthConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SynthConfig::default(),
    };

    match cli.command {
        Command::Prepare { script } => {
            let text = read_script(&script)?;
            println!("{}", prepare(&text).to_json()?);
        }
        Command::Render { script, audio, output, strict } => {
            let text = read_script(&script)?;
            let mono = fs::read(&audio).with_context(|| format!("reading {}", audio.display()))?;
            let bytes = render_bytes(&mono, &text, &config, strict)?;
            fs::write(&output, bytes).with_context(|| format!("writing {}", output.display()))?;
            info!(output = %output.display(), "rendered stereo track");
        }
        Command::Batch { jobs, output } => {
            let written = run_batch(&jobs, &output, &config)?;
            info!(tracks = written.len(), "batch finished");
        }
        Command::Pan(args) => run_pan(&args)?,
    }

    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

/// In strict mode any stereo failure is an error; otherwise the mono source
/// is returned unchanged.
fn render_bytes(mono: &[u8], script: &str, config: &SynthConfig, strict: bool) -> Result<Vec<u8>> {
    let segments = prepare(script).segments;
    if strict {
        Ok(synthesize(mono, &segments, config)?)
    } else {
        Ok(synthesize_or_passthrough(mono, &segments, config))
    }
}

/// `NAME.txt` files in `jobs` that have a sibling `NAME.wav`, sorted by path.
fn collect_jobs(jobs: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut pairs = Vec::new();
    for entry in fs::read_dir(jobs).with_context(|| format!("listing {}", jobs.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            let audio = path.with_extension("wav");
            if audio.exists() {
                pairs.push((path, audio));
            } else {
                info!(script = %path.display(), "no matching wav, skipping");
            }
        }
    }
    pairs.sort();
    Ok(pairs)
}

fn stereo_output_path(output: &Path, script: &Path) -> Result<PathBuf> {
    let stem = script
        .file_stem()
        .and_then(|s| s.to_str())
        .context("script file name is not valid UTF-8")?;
    Ok(output.join(format!("{stem}_stereo.wav")))
}

fn run_batch(jobs: &Path, output: &Path, config: &SynthConfig) -> Result<Vec<PathBuf>> {
    let pairs = collect_jobs(jobs)?;

    fs::create_dir_all(output)?;
    let pb = ProgressBar::new(pairs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering stereo tracks");

    let mut written = Vec::with_capacity(pairs.len());
    for (script, audio) in &pairs {
        let target = stereo_output_path(output, script)?;
        let text = read_script(script)?;
        let mono = fs::read(audio).with_context(|| format!("reading {}", audio.display()))?;
        fs::write(&target, render_bytes(&mono, &text, config, false)?)?;
        written.push(target);
        pb.inc(1);
    }
    pb.finish_with_message("Rendering completed!");
    Ok(written)
}

fn select_gains(wide: bool, focus: Option<Side>) -> Result<ChannelGains> {
    match (wide, focus) {
        (true, _) => Ok(ChannelGains::wide()),
        (false, Some(Side::Left)) => Ok(ChannelGains::focus(Channel::Left)),
        (false, Some(Side::Right)) => Ok(ChannelGains::focus(Channel::Right)),
        (false, None) => bail!("pass either --wide or --focus <left|right>"),
    }
}

fn run_pan(args: &PanArgs) -> Result<()> {
    let gains = select_gains(args.wide, args.focus)?;
    let bytes =
        fs::read(&args.audio).with_context(|| format!("reading {}", args.audio.display()))?;
    let track = decode_mono(&bytes)?;
    let (left, right) = pan(&track.samples, gains);
    fs::write(&args.output, encode(&left, &right, track.sample_rate)?)?;
    info!(gains = %gains.name(), output = %args.output.display(), "panned track");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
    use std::io::Cursor;

    fn mono_wav(len: usize) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..len {
            writer.write_sample((i as i16 + 1) * 10).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn pairs_scripts_with_matching_audio_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "[L]b[/L]").unwrap();
        fs::write(dir.path().join("b.wav"), mono_wav(4)).unwrap();
        fs::write(dir.path().join("a.txt"), "[R]a[/R]").unwrap();
        fs::write(dir.path().join("a.wav"), mono_wav(4)).unwrap();
        fs::write(dir.path().join("orphan.txt"), "no audio").unwrap();
        fs::write(dir.path().join("stray.wav"), mono_wav(4)).unwrap();

        let pairs = collect_jobs(dir.path()).unwrap();
        let name = |p: &PathBuf| p.file_name().unwrap().to_str().unwrap().to_string();
        let names: Vec<_> = pairs.iter().map(|(s, a)| (name(s), name(a))).collect();
        assert_eq!(
            names,
            vec![
                ("a.txt".to_string(), "a.wav".to_string()),
                ("b.txt".to_string(), "b.wav".to_string()),
            ]
        );
    }

    #[test]
    fn batch_writes_stereo_suffixed_tracks() {
        let jobs = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(jobs.path().join("intro.txt"), "[L]hi[/L][R]bye[/R]").unwrap();
        fs::write(jobs.path().join("intro.wav"), mono_wav(100)).unwrap();
        fs::write(jobs.path().join("skipped.txt"), "nothing").unwrap();

        let target = out.path().join("rendered");
        let written = run_batch(jobs.path(), &target, &SynthConfig::default()).unwrap();
        assert_eq!(written, vec![target.join("intro_stereo.wav")]);

        let reader = WavReader::open(&written[0]).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration(), 100);
        assert!(!target.join("skipped_stereo.wav").exists());
    }

    #[test]
    fn output_name_uses_script_stem() {
        let path = stereo_output_path(Path::new("out"), Path::new("jobs/scene.01.txt")).unwrap();
        assert_eq!(path, Path::new("out").join("scene.01_stereo.wav"));
    }

    #[test]
    fn strict_render_fails_where_default_falls_back() {
        let junk = b"not a wav file".to_vec();
        let config = SynthConfig::default();
        assert!(render_bytes(&junk, "[L]x[/L]", &config, true).is_err());
        assert_eq!(render_bytes(&junk, "[L]x[/L]", &config, false).unwrap(), junk);
    }

    #[test]
    fn strict_render_succeeds_on_valid_audio() {
        let bytes = render_bytes(&mono_wav(10), "[R]x[/R]", &SynthConfig::default(), true).unwrap();
        let reader = WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().channels, 2);
    }

    #[test]
    fn gain_selection() {
        assert_eq!(select_gains(true, None).unwrap(), ChannelGains::wide());
        assert_eq!(
            select_gains(false, Some(Side::Right)).unwrap(),
            ChannelGains::focus(Channel::Right)
        );
        assert_eq!(
            select_gains(false, Some(Side::Left)).unwrap(),
            ChannelGains::focus(Channel::Left)
        );
        assert!(select_gains(false, None).is_err());
    }

    #[test]
    fn pan_writes_balanced_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("voice.wav");
        let output = dir.path().join("voice_wide.wav");
        fs::write(&audio, mono_wav(8)).unwrap();

        let args = PanArgs { audio, output: output.clone(), wide: true, focus: None };
        run_pan(&args).unwrap();

        let mut reader = WavReader::open(&output).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples.len(), 16);
        assert!(samples.chunks_exact(2).all(|f| f[0] >= f[1]));
    }

    #[test]
    fn cli_rejects_conflicting_pan_flags() {
        let parsed = Cli::try_parse_from([
            "stereo-script", "pan", "--audio", "a.wav", "--output", "b.wav", "--wide", "--focus",
            "left",
        ]);
        assert!(parsed.is_err());
    }
}
