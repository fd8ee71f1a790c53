use crate::{
    compile::program::{
        FINAL_AUDIO, FINAL_VIDEO, FilterProgram, FilterStage, OutputMap, ProgramInput,
        escape_quoted, num,
    },
    config::{CaptionStyle, LetterboxStyle, ReelConfig},
    foundation::core::{Canvas, Fps},
    foundation::error::{ReelError, ReelResult},
    manifest::model::{
        AudioElement, AudioRole, Element, ImageElement, RenderManifest, SubtitleElement,
        TitleElement,
    },
    motion::KenBurns,
};

/// How caption chunks reach the output video.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubtitleMode {
    /// One enable-windowed `drawtext` per caption line.
    #[default]
    DrawText,
    /// Burn a prebuilt subtitle track (see [`crate::compile::subtitles`]).
    Track {
        /// Subtitle file path.
        path: String,
    },
}

/// Renderer settings that are not part of the manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct CompileOpts {
    /// Font file for title draws; `None` lets the backend pick.
    pub title_font: Option<String>,
    /// Font file for caption draws.
    pub caption_font: Option<String>,
    /// Caption overlay strategy.
    pub subtitles: SubtitleMode,
    /// Letterbox bars drawn over the image stream.
    pub letterbox: LetterboxStyle,
    /// Sample rate of the silent mix bed.
    pub sample_rate: u32,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            title_font: None,
            caption_font: None,
            subtitles: SubtitleMode::DrawText,
            letterbox: LetterboxStyle::default(),
            sample_rate: 48_000,
        }
    }
}

impl CompileOpts {
    /// Fonts and letterbox taken from a render configuration.
    pub fn from_config(cfg: &ReelConfig) -> Self {
        Self {
            title_font: Some(cfg.title.font_path.clone()),
            caption_font: Some(cfg.caption.font_path.clone()),
            letterbox: cfg.letterbox.clone(),
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct GraphBuilder {
    inputs: Vec<ProgramInput>,
    video: Vec<FilterStage>,
    audio: Vec<FilterStage>,
}

impl GraphBuilder {
    fn push_input(&mut self, options: Vec<String>, path: &str) -> usize {
        self.inputs.push(ProgramInput {
            options,
            path: path.to_string(),
        });
        self.inputs.len() - 1
    }

    /// Append a single-input video stage and return its output label.
    fn then_video(&mut self, current: String, filter: String, output: String) -> String {
        self.video
            .push(FilterStage::chain(current, filter, output.clone()));
        output
    }
}

/// Lower a manifest into a filter program.
///
/// Video: per-image cover-fit and pan/zoom, concat in element order, letterbox bars, chained title
/// draws (line order, then left to right), caption overlay, pixel format. Audio: a silent bed as
/// long as the manifest, delayed and scaled narration/SFX clips, looping music, one final mix
/// governed by the bed.
#[tracing::instrument(skip_all, fields(elements = manifest.elements.len()))]
pub fn compile_manifest(manifest: &RenderManifest, opts: &CompileOpts) -> ReelResult<FilterProgram> {
    manifest.validate()?;
    let fps = Fps::new(manifest.metadata.fps)?;
    let canvas = manifest.canvas;
    let mut g = GraphBuilder::default();

    let mut concat = Vec::<String>::new();
    for img in manifest.images() {
        let len = img.end_frame - img.start_frame;
        if len == 0 {
            tracing::debug!(id = %img.id, "skipping zero-length image");
            continue;
        }
        let options = vec![
            "-loop".to_string(),
            "1".to_string(),
            "-framerate".to_string(),
            fps.get().to_string(),
            "-t".to_string(),
            num(fps.frames_to_secs(len)),
        ];
        let input = g.push_input(options, &img.src);
        let label = format!("img{}", concat.len());
        g.video.push(FilterStage::chain(
            format!("{input}:v"),
            image_filter(img, canvas, fps, len),
            label.clone(),
        ));
        concat.push(label);
    }
    if concat.is_empty() {
        return Err(ReelError::compile("manifest has no image frames to draw"));
    }
    let n = concat.len();
    g.video.push(FilterStage {
        inputs: concat,
        filter: format!("concat=n={n}:v=1:a=0"),
        outputs: vec!["base".to_string()],
    });
    let mut current = "base".to_string();

    if let Some(filter) = letterbox_filter(&opts.letterbox) {
        current = g.then_video(current, filter, "boxed".to_string());
    }

    let mut draws = 0usize;
    for el in &manifest.elements {
        if let Element::TitleText(title) = el {
            for filter in title_draws(title, opts.title_font.as_deref()) {
                current = g.then_video(current, filter, format!("title{draws}"));
                draws += 1;
            }
        }
    }

    match &opts.subtitles {
        SubtitleMode::DrawText => {
            let mut subs = 0usize;
            for el in &manifest.elements {
                if let Element::SubtitleChunk(chunk) = el {
                    for filter in caption_draws(chunk, opts.caption_font.as_deref()) {
                        current = g.then_video(current, filter, format!("sub{subs}"));
                        subs += 1;
                    }
                }
            }
        }
        SubtitleMode::Track { path } => {
            let filter = format!("subtitles=filename='{}'", escape_quoted(path));
            current = g.then_video(current, filter, "subbed".to_string());
        }
    }
    g.then_video(current, "format=yuv420p".to_string(), FINAL_VIDEO.to_string());

    let total_secs = fps.frames_to_secs(manifest.metadata.total_frames);
    g.audio.push(FilterStage {
        inputs: vec![],
        filter: format!(
            "anullsrc=r={}:cl=stereo,atrim=duration={}",
            opts.sample_rate,
            num(total_secs)
        ),
        outputs: vec!["abed".to_string()],
    });
    let mut mix = vec!["abed".to_string()];
    for el in &manifest.elements {
        let Element::Audio(clip) = el else {
            continue;
        };
        if clip.start_frame == clip.end_frame {
            tracing::debug!(id = %clip.id, "skipping zero-length audio");
            continue;
        }
        let input = g.push_input(Vec::new(), &clip.src);
        let label = format!("a{}", mix.len() - 1);
        g.audio.push(FilterStage::chain(
            format!("{input}:a"),
            audio_filter(clip, fps),
            label.clone(),
        ));
        mix.push(label);
    }
    if mix.len() == 1 {
        g.audio
            .push(FilterStage::chain("abed", "anull", FINAL_AUDIO));
    } else {
        let n = mix.len();
        g.audio.push(FilterStage {
            inputs: mix,
            filter: format!("amix=inputs={n}:duration=first:dropout_transition=0:normalize=0"),
            outputs: vec![FINAL_AUDIO.to_string()],
        });
    }

    tracing::debug!(
        inputs = g.inputs.len(),
        video_stages = g.video.len(),
        audio_stages = g.audio.len(),
        "filter program compiled"
    );
    Ok(FilterProgram {
        inputs: g.inputs,
        video: g.video,
        audio: g.audio,
        outputs: OutputMap {
            video: FINAL_VIDEO.to_string(),
            audio: FINAL_AUDIO.to_string(),
        },
        fps: fps.get(),
        duration_secs: total_secs,
    })
}

fn image_filter(img: &ImageElement, canvas: Canvas, fps: Fps, len: u64) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let kb: &KenBurns = &img.ken_burns;
    // Same progress curve as `motion::progress`: 0 on the first frame, 1 on the last.
    let progress = format!("min(on/{},1)", len.saturating_sub(1).max(1));
    let zoom = lerp_expr(kb.from_scale, kb.to_scale, &progress);
    let dx = lerp_expr(kb.from_x, kb.to_x, &progress);
    let dy = lerp_expr(kb.from_y, kb.to_y, &progress);
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1,\
         zoompan=z='{zoom}':x='{x}':y='{y}':d=1:s={w}x{h}:fps={fps},\
         trim=end_frame={len},setpts=PTS-STARTPTS",
        x = pan_expr("iw", &dx),
        y = pan_expr("ih", &dy),
        fps = fps.get(),
    )
}

fn lerp_expr(from: f64, to: f64, progress: &str) -> String {
    if from == to {
        num(from)
    } else {
        format!("{}+({})*{progress}", num(from), num(to - from))
    }
}

/// Crop window origin that keeps the zoomed image centered, shifted by `offset` output pixels.
fn pan_expr(dim: &str, offset: &str) -> String {
    if offset == "0" {
        format!("{dim}/2-{dim}/zoom/2")
    } else {
        format!("{dim}/2-{dim}/zoom/2-({offset})/zoom")
    }
}

fn letterbox_filter(style: &LetterboxStyle) -> Option<String> {
    let color = style.color.to_ffmpeg();
    let mut bars = Vec::<String>::new();
    if style.top_px > 0 {
        bars.push(format!(
            "drawbox=x=0:y=0:w=iw:h={}:color={color}:t=fill",
            style.top_px
        ));
    }
    if style.bottom_px > 0 {
        bars.push(format!(
            "drawbox=x=0:y=ih-{b}:w=iw:h={b}:color={color}:t=fill",
            b = style.bottom_px
        ));
    }
    (!bars.is_empty()).then(|| bars.join(","))
}

fn title_draws(title: &TitleElement, font: Option<&str>) -> Vec<String> {
    let size = title.font_size.unwrap_or(80.0);
    let regular = title.color.as_deref().map_or("white".to_string(), hex_to_ffmpeg);
    let highlight = title
        .highlight_color
        .as_deref()
        .map_or("yellow".to_string(), hex_to_ffmpeg);

    let mut out = Vec::new();
    for line in &title.lines {
        for seg in &line.segments {
            if seg.text.is_empty() {
                continue;
            }
            let color = if seg.is_highlight { &highlight } else { &regular };
            out.push(format!(
                "drawtext={font}text='{text}':expansion=none:fontsize={size}:fontcolor={color}:x={x}:y={y}",
                font = font_opt(font),
                text = escape_quoted(&seg.text),
                size = num(f64::from(size)),
                x = num(seg.x),
                y = num(line.y),
            ));
        }
    }
    out
}

fn caption_draws(chunk: &SubtitleElement, font: Option<&str>) -> Vec<String> {
    if chunk.text.trim().is_empty() || chunk.start_frame == chunk.end_frame {
        return Vec::new();
    }
    let fallback = CaptionStyle::default();
    let size = chunk.font_size.unwrap_or(fallback.size_px);
    let top = chunk.y.unwrap_or(fallback.y);
    let spacing = chunk.line_spacing.unwrap_or(fallback.line_spacing);
    let color = chunk.color.as_deref().map_or("white".to_string(), hex_to_ffmpeg);
    let lines: Vec<&str> = if chunk.lines.is_empty() {
        vec![chunk.text.as_str()]
    } else {
        chunk.lines.iter().map(String::as_str).collect()
    };

    lines
        .iter()
        .enumerate()
        .map(|(k, line)| {
            format!(
                "drawtext={font}text='{text}':expansion=none:fontsize={size}:fontcolor={color}:\
                 borderw=4:bordercolor=black:x=(w-text_w)/2:y={y}:\
                 enable='gte(n,{start})*lt(n,{end})'",
                font = font_opt(font),
                text = escape_quoted(line),
                size = num(f64::from(size)),
                y = num(top + (k as f64) * spacing),
                start = chunk.start_frame,
                end = chunk.end_frame,
            )
        })
        .collect()
}

fn audio_filter(clip: &AudioElement, fps: Fps) -> String {
    let volume = num(clip.volume);
    let delay_ms = fps.frames_to_millis(clip.start_frame);
    match clip.role {
        AudioRole::Music if delay_ms == 0 => {
            format!("volume={volume},aloop=loop=-1:size=2e9")
        }
        AudioRole::Music => {
            format!("volume={volume},aloop=loop=-1:size=2e9,adelay={delay_ms}|{delay_ms}")
        }
        AudioRole::Narration | AudioRole::Sfx => {
            let len = fps.frames_to_secs(clip.end_frame - clip.start_frame);
            format!(
                "atrim=end={},asetpts=PTS-STARTPTS,adelay={delay_ms}|{delay_ms},volume={volume}",
                num(len)
            )
        }
    }
}

fn font_opt(font: Option<&str>) -> String {
    font.map_or(String::new(), |f| format!("fontfile='{}':", escape_quoted(f)))
}

/// `#rrggbbaa` to `0xrrggbbaa`; anything else is passed through.
fn hex_to_ffmpeg(hex: &str) -> String {
    match hex.strip_prefix('#') {
        Some(digits) => format!("0x{digits}"),
        None => hex.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/filtergraph.rs"]
mod tests;
