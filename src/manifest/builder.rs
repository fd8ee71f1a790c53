use crate::{
    config::ReelConfig,
    foundation::core::Fps,
    foundation::error::ReelResult,
    layout::caption::{CaptionWrapper, chunk_sentence},
    layout::keywords::{HangulLatinKeywords, KeywordStrategy},
    layout::metrics::LayoutContext,
    layout::title::TitleLayoutEngine,
    manifest::model::{
        AudioElement, AudioRole, Element, ImageElement, Metadata, RenderManifest, SubtitleElement,
        TitleElement,
    },
    motion::KenBurns,
    script::{EditorSegment, Script, resolve_edits},
    timing::compute_timeline,
};

/// Build a manifest with the default Korean/Latin keyword strategy.
pub fn build_manifest(
    script: &Script,
    edits: &[EditorSegment],
    cfg: &ReelConfig,
    ctx: &mut LayoutContext,
) -> ReelResult<RenderManifest> {
    build_manifest_with(script, edits, cfg, ctx, &HangulLatinKeywords::new())
}

/// Assemble the manifest for `(script, edits)`.
///
/// Per sentence, in order: the image, the narration clip and its caption chunks. Then the title,
/// the looping background music when configured, and one sound effect per edit that names one.
/// `edits` may be empty (all defaults) or hold exactly one entry per sentence.
#[tracing::instrument(skip_all, fields(sentences = script.sentences.len()))]
pub fn build_manifest_with(
    script: &Script,
    edits: &[EditorSegment],
    cfg: &ReelConfig,
    ctx: &mut LayoutContext,
    strategy: &dyn KeywordStrategy,
) -> ReelResult<RenderManifest> {
    script.validate()?;
    cfg.validate()?;
    let edits = resolve_edits(script, edits)?;
    let fps = Fps::new(cfg.fps)?;

    let delays: Vec<f64> = edits.iter().map(|e| e.delay).collect();
    let timeline = compute_timeline(
        &script.sentences,
        &delays,
        fps,
        cfg.default_sentence_secs,
    )?;
    let total = timeline.total_frames;

    let wrapper = CaptionWrapper::new(&cfg.caption);
    let mut elements = Vec::<Element>::new();
    for (idx, ((sentence, timing), edit)) in script
        .sentences
        .iter()
        .zip(&timeline.sentences)
        .zip(&edits)
        .enumerate()
    {
        elements.push(Element::Image(ImageElement {
            id: format!("img-{idx}"),
            src: sentence.image_path.clone(),
            start_frame: timing.range.start.0,
            end_frame: timing.range.end.0,
            vfx: edit.vfx,
            ken_burns: KenBurns::for_vfx(edit.vfx, &cfg.motion),
        }));

        elements.push(Element::Audio(AudioElement {
            id: format!("tts-{idx}"),
            src: sentence.audio_path.clone(),
            start_frame: timing.narration.start.0,
            end_frame: timing.narration.end.0,
            volume: cfg.audio.tts_volume,
            role: AudioRole::Narration,
        }));

        let chunks = chunk_sentence(&sentence.text, timing.narration)?;
        tracing::debug!(sentence = idx, chunks = chunks.len(), "captions chunked");
        for (j, chunk) in chunks.into_iter().enumerate() {
            let lines = wrapper.wrap(ctx, &chunk.text);
            elements.push(Element::SubtitleChunk(SubtitleElement {
                id: format!("sub-{idx}-{j}"),
                text: chunk.text,
                start_frame: chunk.range.start.0,
                end_frame: chunk.range.end.0,
                lines,
                y: Some(cfg.caption.y),
                font_size: Some(cfg.caption.size_px),
                line_spacing: Some(cfg.caption.line_spacing),
                color: Some(cfg.caption.color.to_hex()),
            }));
        }
    }

    let title = TitleLayoutEngine::new(&cfg.title, cfg.canvas.width, strategy)
        .layout(ctx, &script.title);
    elements.push(Element::TitleText(TitleElement {
        id: "title".to_string(),
        lines: title.lines,
        start_frame: 0,
        end_frame: total,
        font_size: Some(cfg.title.size_px),
        color: Some(cfg.title.color.to_hex()),
        highlight_color: Some(cfg.title.highlight_color.to_hex()),
    }));

    if let Some(bgm) = &cfg.audio.bgm_path {
        elements.push(Element::Audio(AudioElement {
            id: "bgm".to_string(),
            src: bgm.clone(),
            start_frame: 0,
            end_frame: total,
            volume: cfg.audio.bgm_volume,
            role: AudioRole::Music,
        }));
    }

    let sfx_frames = fps.secs_to_frames_floor(cfg.audio.sfx_secs);
    for (idx, (edit, timing)) in edits.iter().zip(&timeline.sentences).enumerate() {
        let Some(tag) = edit.sfx.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        let start = timing.narration.start.0;
        elements.push(Element::Audio(AudioElement {
            id: format!("sfx-{idx}"),
            src: cfg.audio.sfx_path(tag),
            start_frame: start,
            end_frame: (start + sfx_frames).min(total),
            volume: cfg.audio.sfx_volume,
            role: AudioRole::Sfx,
        }));
    }

    if ctx.fallback_hits() > 0 {
        tracing::warn!(
            hits = ctx.fallback_hits(),
            "text widths estimated without font metrics"
        );
    }

    let manifest = RenderManifest {
        version: cfg.manifest_version.clone(),
        canvas: cfg.canvas,
        elements,
        metadata: Metadata {
            total_frames: total,
            fps: fps.get(),
            title: script.title.clone(),
        },
    };
    manifest.validate()?;
    tracing::debug!(
        elements = manifest.elements.len(),
        total_frames = total,
        "manifest built"
    );
    Ok(manifest)
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/builder.rs"]
mod tests;
