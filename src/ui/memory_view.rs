//! Stack frame pane rendering
//!
//! Draws a [`SwapSnapshot`] as a bordered pane: one section per phase (before
//! and after the swap), one row per slot with its address, name, type, raw
//! bytes and decoded value, and a footer with scratch buffer statistics.
//!
//! The pane is rendered into an off-screen ratatui [`Buffer`] and then written
//! to the console line by line, so it works on any writer and interleaves with
//! the prompts instead of taking over the terminal.

use crate::memory::scratch::ScratchStats;
use crate::snapshot::{FrameSnapshot, SlotSnapshot, SwapSnapshot};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::io::{self, Write};

/// Default pane width in columns
pub const MEMORY_VIEW_WIDTH: u16 = 64;

/// Rows needed to show `snapshot`, borders included
pub fn memory_view_height(snapshot: &SwapSnapshot) -> u16 {
    let rows = 2 + snapshot.before.slots.len() + snapshot.after.slots.len() + 1;
    (rows + 2) as u16
}

/// Render the stack frame pane
pub fn render_memory_view(snapshot: &SwapSnapshot, stats: ScratchStats, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(
            " Stack Frame: {}() · cycle {} ",
            snapshot.before.function_name, snapshot.cycle
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    let mut lines = Vec::new();
    lines.push(section_header("Before swap", None));
    push_slots(&mut lines, &snapshot.before, None);

    let note = if snapshot.changed() {
        None
    } else {
        Some("(unchanged)")
    };
    lines.push(section_header("After swap", note));
    push_slots(&mut lines, &snapshot.after, Some(&snapshot.before));

    lines.push(scratch_line(stats));

    Paragraph::new(lines).block(block).render(area, buf);
}

/// Render into a fresh buffer sized for `snapshot`
pub fn render_to_buffer(snapshot: &SwapSnapshot, stats: ScratchStats, width: u16) -> Buffer {
    let area = Rect::new(0, 0, width, memory_view_height(snapshot));
    let mut buf = Buffer::empty(area);
    render_memory_view(snapshot, stats, area, &mut buf);
    buf
}

/// Plain text of each buffer row, trailing blanks trimmed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width as usize;
    if width == 0 {
        return Vec::new();
    }
    buf.content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Write a rendered buffer, optionally with foreground colors
pub fn write_buffer<W: Write>(out: &mut W, buf: &Buffer, color: bool) -> io::Result<()> {
    let width = buf.area.width as usize;
    if width == 0 {
        return Ok(());
    }

    for row in buf.content.chunks(width) {
        let mut current: Option<Color> = None;
        for cell in row {
            if color && current != Some(cell.fg) {
                queue!(out, SetForegroundColor(to_term_color(cell.fg)))?;
                current = Some(cell.fg);
            }
            queue!(out, Print(cell.symbol()))?;
        }
        if color {
            queue!(out, ResetColor)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

fn section_header(title: &'static str, note: Option<&'static str>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(note) = note {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(note, Style::default().fg(DEFAULT_THEME.comment)));
    }
    Line::from(spans)
}

fn push_slots(lines: &mut Vec<Line<'static>>, frame: &FrameSnapshot, previous: Option<&FrameSnapshot>) {
    for slot in &frame.slots {
        let changed = previous
            .and_then(|p| p.slot(&slot.name))
            .is_some_and(|old| old.bytes != slot.bytes);
        lines.push(slot_line(slot, changed));
    }
}

fn slot_line(slot: &SlotSnapshot, changed: bool) -> Line<'static> {
    let hex = slot
        .bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");

    let value_style = if !slot.initialized {
        Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::DIM)
    } else if changed {
        Style::default().fg(DEFAULT_THEME.success)
    } else {
        Style::default().fg(DEFAULT_THEME.number)
    };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("0x{:08x}", slot.address),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{:<6}", slot.name),
            Style::default().fg(DEFAULT_THEME.function),
        ),
        Span::styled(
            format!("{:<6}", slot.type_name),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
        Span::styled(format!("{:<24}", hex), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(slot.rendered.clone(), value_style),
    ])
}

fn scratch_line(stats: ScratchStats) -> Line<'static> {
    let style = if stats.live_bytes == 0 {
        Style::default().fg(DEFAULT_THEME.comment)
    } else {
        Style::default().fg(DEFAULT_THEME.error)
    };
    Line::from(Span::styled(
        format!(
            "Scratch: {} acquired, {} released, {} live, peak {} bytes",
            stats.acquisitions, stats.releases, stats.live_bytes, stats.peak_bytes
        ),
        style,
    ))
}

fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        _ => TermColor::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::scratch::ScratchAllocator;
    use crate::memory::stack::StackFrame;
    use crate::memory::swap::swap_slots;

    fn swapped_snapshot() -> (SwapSnapshot, ScratchStats) {
        let mut frame = StackFrame::new("main");
        let mut scratch = ScratchAllocator::default();
        let a = frame.declare::<i32>("num1").unwrap();
        let b = frame.declare::<i32>("num2").unwrap();
        frame.write(a, 5).unwrap();
        frame.write(b, 10).unwrap();

        let before = FrameSnapshot::capture(&frame);
        swap_slots(&mut frame, a, b, &mut scratch).unwrap();
        let snapshot = SwapSnapshot {
            cycle: 1,
            before,
            after: FrameSnapshot::capture(&frame),
        };
        (snapshot, scratch.stats())
    }

    #[test]
    fn test_height_counts_sections_and_borders() {
        let (snapshot, _) = swapped_snapshot();
        // 2 borders + 2 headers + 2 + 2 slot rows + 1 footer
        assert_eq!(memory_view_height(&snapshot), 9);
    }

    #[test]
    fn test_pane_shows_bytes_before_and_after() {
        let (snapshot, stats) = swapped_snapshot();
        let buf = render_to_buffer(&snapshot, stats, MEMORY_VIEW_WIDTH);
        let lines = buffer_lines(&buf);

        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("Stack Frame: main()"));
        assert!(lines[1].contains("Before swap"));
        assert!(lines[2].contains("0x00000004"));
        assert!(lines[2].contains("num1"));
        assert!(lines[2].contains("05 00 00 00"));
        assert!(lines[2].trim_end_matches('│').trim_end().ends_with('5'));
        assert!(lines[4].contains("After swap"));
        assert!(!lines[4].contains("(unchanged)"));
        assert!(lines[5].contains("0a 00 00 00"));
        assert!(lines[6].contains("05 00 00 00"));
        assert!(lines[7].contains("1 acquired, 1 released, 0 live, peak 4 bytes"));
    }

    #[test]
    fn test_plain_write_has_no_escape_codes() {
        let (snapshot, stats) = swapped_snapshot();
        let buf = render_to_buffer(&snapshot, stats, MEMORY_VIEW_WIDTH);

        let mut out = Vec::new();
        write_buffer(&mut out, &buf, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains('\u{1b}'));
        assert_eq!(text.lines().count(), 9);

        let mut colored = Vec::new();
        write_buffer(&mut colored, &buf, true).unwrap();
        assert!(String::from_utf8(colored).unwrap().contains('\u{1b}'));
    }

    #[test]
    fn test_unchanged_swap_is_marked() {
        let mut frame = StackFrame::new("main");
        frame.declare::<i32>("num1").unwrap();
        let snapshot = SwapSnapshot {
            cycle: 3,
            before: FrameSnapshot::capture(&frame),
            after: FrameSnapshot::capture(&frame),
        };
        let buf = render_to_buffer(&snapshot, ScratchStats::default(), MEMORY_VIEW_WIDTH);
        let lines = buffer_lines(&buf);
        assert!(lines[3].contains("(unchanged)"));
        assert!(lines[2].contains("[uninit]"));
    }
}
