use std::io::Cursor;
use anyhow::{Result, Context};
use quick_xml::{Reader, Writer};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use log::debug;
use crate::errors::DocumentError;

/// Shape subtrees that never carry translatable text bodies: grouped
/// shapes, graphic frames (tables, charts), pictures, and connectors.
const OPAQUE_SHAPES: [&[u8]; 4] = [b"grpSp", b"graphicFrame", b"pic", b"cxnSp"];

/// Paragraph counts from rewriting a single slide part
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideCounts {
    /// Paragraphs sent for translation
    pub translated: usize,

    /// Blank paragraphs left untouched
    pub skipped: usize,
}

/// Rewrite the paragraph text of one slide part.
///
/// Streams the slide XML event by event, echoing everything except the
/// paragraphs of top-level shape text bodies. Each paragraph whose trimmed
/// text is non-empty is handed to `translate` and re-emitted with the
/// returned text; blank paragraphs and opaque shape subtrees pass through
/// verbatim. Returns the rewritten XML and the paragraph counts.
pub fn rewrite_slide_text<F>(xml: &[u8], translate: &mut F) -> Result<(Vec<u8>, SlideCounts)>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    let mut counts = SlideCounts::default();
    let mut skip_depth = 0usize;
    let mut in_shape = false;
    let mut in_body = false;
    let mut paragraph: Option<Vec<Event<'static>>> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            DocumentError::Xml(format!(
                "Slide parse error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        if matches!(event, Event::Eof) {
            break;
        }

        // Collect paragraph events until the closing tag, then decide
        // whether to translate or echo the whole element.
        if paragraph.is_some() {
            let is_end = matches!(&event, Event::End(e) if e.local_name().as_ref() == b"p");
            if let Some(events) = paragraph.as_mut() {
                events.push(event.into_owned());
            }
            if is_end {
                if let Some(events) = paragraph.take() {
                    if rewrite_paragraph(&mut writer, &events, translate)? {
                        counts.translated += 1;
                    } else {
                        counts.skipped += 1;
                    }
                }
            }
            buf.clear();
            continue;
        }

        // Inside an opaque shape subtree: echo until it closes.
        if skip_depth > 0 {
            match &event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                _ => {},
            }
            writer.write_event(event).context("Failed to write slide event")?;
            buf.clear();
            continue;
        }

        let mut start_paragraph = false;
        match &event {
            Event::Start(e) => match e.local_name().as_ref() {
                name if OPAQUE_SHAPES.contains(&name) => skip_depth = 1,
                b"sp" => in_shape = true,
                b"txBody" if in_shape => in_body = true,
                b"p" if in_body => start_paragraph = true,
                _ => {},
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"sp" => in_shape = false,
                b"txBody" => in_body = false,
                _ => {},
            },
            Event::Empty(e) => {
                // Self-closed <a:p/> carries no text at all
                if e.local_name().as_ref() == b"p" && in_body {
                    counts.skipped += 1;
                }
            },
            _ => {},
        }

        if start_paragraph {
            paragraph = Some(vec![event.into_owned()]);
        } else {
            writer.write_event(event).context("Failed to write slide event")?;
        }
        buf.clear();
    }

    Ok((writer.into_inner().into_inner(), counts))
}

/// Translate one buffered `<a:p>` element and write the replacement.
///
/// Blank paragraphs are echoed verbatim and reported as not translated.
/// Translated paragraphs keep their `<a:pPr>` and `<a:endParaRPr>`
/// subtrees; the original runs, breaks, and fields are replaced by runs
/// carrying the first run's `<a:rPr>` and the translated text, with one
/// `<a:br/>` per line break.
fn rewrite_paragraph<F>(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    events: &[Event<'static>],
    translate: &mut F,
) -> Result<bool>
where
    F: FnMut(&str) -> Result<String>,
{
    let text = paragraph_text(events);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        debug!("Skipping blank paragraph");
        write_events(writer, events)?;
        return Ok(false);
    }

    let translated = translate(trimmed)?;

    // <a:pPr> is only ever the first element child of <a:p>
    let mut ppr_span = None;
    for (i, event) in events.iter().enumerate().skip(1) {
        match event {
            Event::Start(e) | Event::Empty(e) => {
                if e.local_name().as_ref() == b"pPr" {
                    ppr_span = Some((i, subtree_end(events, i)));
                }
                break;
            },
            _ => {},
        }
    }

    let scan_from = ppr_span.map_or(1, |(_, end)| end);
    let run_properties = first_run_properties(events, scan_from);
    let end_properties = find_direct_subtree(events, scan_from, b"endParaRPr");

    // Original <a:p> start tag with its attributes
    if let Some(event) = events.first() {
        writer
            .write_event(event.clone())
            .context("Failed to write paragraph start")?;
    }
    if let Some((start, end)) = ppr_span {
        write_events(writer, &events[start..end])?;
    }

    for (i, segment) in translated.split('\n').enumerate() {
        if i > 0 {
            writer
                .write_event(Event::Empty(BytesStart::new("a:br")))
                .context("Failed to write line break")?;
        }
        if segment.is_empty() {
            continue;
        }
        writer
            .write_event(Event::Start(BytesStart::new("a:r")))
            .context("Failed to write run")?;
        if let Some((start, end)) = run_properties {
            write_events(writer, &events[start..end])?;
        }
        writer
            .write_event(Event::Start(BytesStart::new("a:t")))
            .context("Failed to write run text")?;
        writer
            .write_event(Event::Text(BytesText::new(segment)))
            .context("Failed to write run text")?;
        writer
            .write_event(Event::End(BytesEnd::new("a:t")))
            .context("Failed to write run text")?;
        writer
            .write_event(Event::End(BytesEnd::new("a:r")))
            .context("Failed to write run")?;
    }

    if let Some((start, end)) = end_properties {
        write_events(writer, &events[start..end])?;
    }
    if let Some(event) = events.last() {
        writer
            .write_event(event.clone())
            .context("Failed to write paragraph end")?;
    }

    Ok(true)
}

/// Concatenated paragraph text: every `<a:t>` in document order, with one
/// newline per `<a:br/>`, entities decoded.
fn paragraph_text(events: &[Event<'static>]) -> String {
    let mut text = String::new();
    let mut in_text = false;
    for event in events {
        match event {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) if e.local_name().as_ref() == b"t" => in_text = false,
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"br" => {
                text.push('\n');
            },
            Event::Text(t) if in_text => {
                if let Ok(raw) = std::str::from_utf8(t.as_ref()) {
                    text.push_str(&decode_entities(raw));
                }
            },
            Event::CData(c) if in_text => {
                if let Ok(raw) = std::str::from_utf8(c.as_ref()) {
                    text.push_str(raw);
                }
            },
            Event::GeneralRef(r) if in_text => {
                if let Ok(name) = std::str::from_utf8(r.as_ref()) {
                    if let Some(ch) = resolve_entity(name) {
                        text.push(ch);
                    }
                }
            },
            _ => {},
        }
    }
    text
}

/// The `<a:rPr>` subtree of the first `<a:r>`, if both exist.
fn first_run_properties(events: &[Event<'static>], from: usize) -> Option<(usize, usize)> {
    let mut i = from;
    while i < events.len() {
        if let Event::Start(e) = &events[i] {
            if e.local_name().as_ref() == b"r" {
                let run_end = subtree_end(events, i);
                return find_direct_subtree(&events[..run_end], i + 1, b"rPr");
            }
        }
        i += 1;
    }
    None
}

/// First subtree with the given local name at or after `from`.
fn find_direct_subtree(
    events: &[Event<'static>],
    from: usize,
    name: &[u8],
) -> Option<(usize, usize)> {
    let mut i = from;
    while i < events.len() {
        match &events[i] {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == name => {
                return Some((i, subtree_end(events, i)));
            },
            Event::Start(_) => {
                // Do not descend into sibling elements
                i = subtree_end(events, i);
            },
            _ => i += 1,
        }
    }
    None
}

/// Index one past the subtree rooted at `start` (exclusive end).
fn subtree_end(events: &[Event<'static>], start: usize) -> usize {
    match &events[start] {
        Event::Start(_) => {
            let mut depth = 1usize;
            let mut i = start + 1;
            while i < events.len() && depth > 0 {
                match &events[i] {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => depth -= 1,
                    _ => {},
                }
                i += 1;
            }
            i
        },
        _ => start + 1,
    }
}

fn write_events(writer: &mut Writer<Cursor<Vec<u8>>>, events: &[Event<'static>]) -> Result<()> {
    for event in events {
        writer
            .write_event(event.clone())
            .context("Failed to write slide event")?;
    }
    Ok(())
}

/// Decode the predefined XML entities and numeric character references.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match after.find(';') {
            Some(end) if end > 0 && end <= 10 => match resolve_entity(&after[..end]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &after[end + 1..];
                },
                None => {
                    out.push('&');
                    rest = after;
                },
            },
            _ => {
                out.push('&');
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}

fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        },
    }
}
