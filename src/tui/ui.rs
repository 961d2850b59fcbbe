//! TUI rendering with ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::form::{Control, FormState, StatusKind};
use crate::draft::{format_rupiah, Field, FieldKind, FileSlot, LoanAmount};
use crate::wizard::{Acknowledgment, Step};

const BRAND: &str = "Kamikaya";
const TAGLINE: &str = "Lebih banyak pilihan, lebih cepat disetujui";

const ABOUT: &str = "KamiKaya adalah platform layanan keuangan lokal, yang menyediakan \
pengguna terdaftar dengan Layanan keuangan yang aman dan nyaman, tanpa rekening bank \
Layanan rumah tangga dan keuangan. Dengan bantuan gotong royong antar anggota, KamiKaya \
memungkinkan pengguna Indonesia untuk membuka rekening dari jauh dan menggunakan emas \
Layanan keuangan.";

const VISION: &[&str] = &[
    "Tingkatkan keanggotaan dan pendapatan sosial.",
    "Mengembangkan kesadaran publik tentang aktivitas berbasis dalam kehidupan.",
    "Meningkatkan kemandirian ekonomi antar anggota.",
];

const SERVICES: &str = "Menyediakan pembiayaan untuk anggota dan anggota keluarga lainnya, \
termasuk Isi ulang ponsel, pinjaman hipotek emas, pembelian komoditas multiguna, modal \
ventura, modal pertanian, hipotek emas multiguna kendaraan, mobil dan sepeda motor";

const TERMS: &str = "Saya menyetujui syarat dan ketentuan serta kebijakan privasi KamiKaya";
const FILE_HINT: &str = "Format: JPG, PNG (Max 5MB)";

fn bold(color: Color) -> Style {
    Style::default()
        .fg(color)
        .add_modifier(ratatui::style::Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn panel(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(bold(color))
        .borders(Borders::ALL)
        .border_style(dim())
        .border_set(symbols::border::ROUNDED)
}

/// Draw the entire TUI.
pub fn draw(f: &mut Frame, form: &FormState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(5), // Loan card
            Constraint::Length(1), // Progress
            Constraint::Min(8),    // Step body
            Constraint::Length(1), // Status
            Constraint::Length(2), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0]);
    draw_loan_card(f, chunks[1], form.wizard.draft.loan_amount);
    draw_progress(f, chunks[2], form.wizard.step);
    draw_step(f, chunks[3], form);
    draw_status(f, chunks[4], form);
    draw_footer(f, chunks[5], form.wizard.step);

    if let Some(ack) = &form.acknowledgment {
        draw_acknowledgment(f, area, ack);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let spans = vec![
        Span::styled(" ◉ ", bold(Color::Yellow)),
        Span::styled(BRAND, bold(Color::Cyan)),
        Span::styled(" │ ", dim()),
        Span::styled(TAGLINE, Style::default().fg(Color::White)),
        Span::styled(" │ ", dim()),
        Span::styled("💰 Tabungan  📊 Pendanaan  💎 Keuangan", dim()),
    ];

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(dim())
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(header, area);
}

/// Slider track for `amount` in `width` cells.
pub(crate) fn slider_track(amount: LoanAmount, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let knob = (amount.ratio() * (width - 1) as f64).round() as usize;
    (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}

fn draw_loan_card(f: &mut Frame, area: Rect, amount: LoanAmount) {
    let width = area.width.saturating_sub(2) as usize;
    let track = slider_track(amount, width);
    let (filled, rest) = track.split_at(track.find('●').unwrap_or(track.len()));
    let ends = format!(
        "1 Juta{:>pad$}",
        "50 Juta",
        pad = width.saturating_sub("1 Juta".len())
    );

    let lines = vec![
        Line::from(Span::styled(format_rupiah(amount.value() as i64), bold(Color::White))),
        Line::from(vec![
            Span::styled(filled.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(rest.to_string(), dim()),
        ]),
        Line::from(Span::styled(ends, dim())),
    ];

    let card = Paragraph::new(lines).block(panel("💰 Pinjaman maksimal", Color::Yellow));
    f.render_widget(card, area);
}

fn draw_progress(f: &mut Frame, area: Rect, step: Step) {
    let mut spans = vec![Span::raw(" ")];
    for s in Step::ALL {
        let style = if step >= s {
            Style::default().fg(Color::Blue)
        } else {
            dim()
        };
        spans.push(Span::styled(if step >= s { "● " } else { "○ " }, style));
    }
    spans.push(Span::styled(
        format!(" Langkah {}/4", step.number()),
        dim(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_step(f: &mut Frame, area: Rect, form: &FormState) {
    let step = form.wizard.step;
    let mut lines = match step {
        Step::Intro => intro_lines(form.show_intro),
        Step::Personal | Step::Financial => field_lines(form),
        Step::Documents => document_lines(form),
    };
    lines.push(Line::from(""));
    lines.push(button_line(form));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel(step.title(), Color::Cyan));
    f.render_widget(body, area);
}

fn intro_lines(show_intro: bool) -> Vec<Line<'static>> {
    if !show_intro {
        return vec![Line::from(Span::styled(
            "Ajukan pinjaman dalam empat langkah.",
            Style::default().fg(Color::White),
        ))];
    }
    let mut lines = vec![
        Line::from(Span::styled(ABOUT, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled("🔍 VISI KAMI", bold(Color::Cyan))),
    ];
    for item in VISION {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Blue)),
            Span::styled(*item, Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "APA YANG BISA KAMI LAKUKAN?",
        bold(Color::Cyan),
    )));
    lines.push(Line::from(Span::styled(
        SERVICES,
        Style::default().fg(Color::White),
    )));
    lines
}

fn marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▶ ", bold(Color::Yellow))
    } else {
        Span::raw("  ")
    }
}

fn field_lines(form: &FormState) -> Vec<Line<'static>> {
    let focused = form.focused();
    let mut lines = Vec::new();
    for field in form.wizard.step.fields() {
        let is_focused = focused == Control::Input(*field);
        let label_style = if is_focused {
            bold(Color::Yellow)
        } else {
            bold(Color::White)
        };
        lines.push(Line::from(vec![
            marker(is_focused),
            Span::styled(field.label(), label_style),
        ]));
        lines.extend(value_lines(form, *field, is_focused));
    }
    lines
}

fn value_lines(form: &FormState, field: Field, focused: bool) -> Vec<Line<'static>> {
    let raw = form.wizard.draft.get(field);
    let cursor = if focused { "▏" } else { "" };

    match field.kind() {
        FieldKind::Choice(_) => {
            let (text, style) = if raw.is_empty() {
                (field.placeholder().to_string(), dim())
            } else {
                (
                    form.wizard.draft.display_value(field).to_string(),
                    Style::default().fg(Color::White),
                )
            };
            let arrows = if focused { bold(Color::Yellow) } else { dim() };
            vec![Line::from(vec![
                Span::raw("    "),
                Span::styled("◀ ", arrows),
                Span::styled(text, style),
                Span::styled(" ▶", arrows),
            ])]
        }
        FieldKind::Text | FieldKind::Multiline if raw.is_empty() => vec![Line::from(vec![
            Span::raw("    "),
            Span::styled(field.placeholder(), dim()),
            Span::styled(cursor, bold(Color::Yellow)),
        ])],
        FieldKind::Text | FieldKind::Multiline => {
            let mut lines: Vec<Line<'static>> = raw
                .split('\n')
                .map(|part| {
                    Line::from(vec![
                        Span::raw("    "),
                        Span::styled(part.to_string(), Style::default().fg(Color::White)),
                    ])
                })
                .collect();
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled(cursor, bold(Color::Yellow)));
            }
            lines
        }
    }
}

fn document_lines(form: &FormState) -> Vec<Line<'static>> {
    let focused = form.focused();
    let mut lines = Vec::new();

    for slot in FileSlot::ALL {
        let is_focused = focused == Control::File(slot);
        lines.push(Line::from(vec![
            marker(is_focused),
            Span::styled(
                slot.label(),
                if is_focused {
                    bold(Color::Yellow)
                } else {
                    bold(Color::White)
                },
            ),
        ]));
        match form.wizard.draft.file(slot) {
            Some(file) => lines.push(Line::from(vec![
                Span::styled("    ✓ ", bold(Color::Green)),
                Span::styled(file.name.clone(), Style::default().fg(Color::Green)),
            ])),
            None => lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(slot.prompt(), Style::default().fg(Color::White)),
            ])),
        }
        let typed = form.file_input(slot);
        if is_focused || !typed.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("    Path: ", dim()),
                Span::styled(typed.to_string(), Style::default().fg(Color::White)),
                Span::styled(if is_focused { "▏" } else { "" }, bold(Color::Yellow)),
            ]));
        }
        lines.push(Line::from(Span::styled(format!("    {FILE_HINT}"), dim())));
        lines.push(Line::from(""));
    }

    let terms_focused = focused == Control::Terms;
    let checkbox = if form.wizard.terms_accepted {
        "[x] "
    } else {
        "[ ] "
    };
    lines.push(Line::from(vec![
        marker(terms_focused),
        Span::styled(
            checkbox,
            if form.wizard.terms_accepted {
                bold(Color::Green)
            } else {
                bold(Color::White)
            },
        ),
        Span::styled(TERMS, Style::default().fg(Color::White)),
    ]));
    lines
}

fn button_line(form: &FormState) -> Line<'static> {
    let focused = form.focused();
    let mut spans = vec![Span::raw("  ")];
    for control in form.controls() {
        let label = match control {
            Control::Start => "Mulai Pengajuan",
            Control::Back => "Kembali",
            Control::Next => "Lanjut",
            Control::Submit => "Submit Pengajuan",
            _ => continue,
        };
        let style = if control == focused {
            bold(Color::Black).bg(Color::Yellow)
        } else if matches!(control, Control::Back) {
            Style::default().fg(Color::White)
        } else {
            bold(Color::Blue)
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn draw_status(f: &mut Frame, area: Rect, form: &FormState) {
    let line = match &form.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => Style::default().fg(Color::Green),
                StatusKind::Error => bold(Color::Red),
            };
            Line::from(Span::styled(format!(" {}", status.text), style))
        }
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_footer(f: &mut Frame, area: Rect, step: Step) {
    let key = |k: &'static str| Span::styled(k, bold(Color::Yellow));
    let text = |t: &'static str| Span::styled(t, dim());

    let mut help = vec![
        key(" tab"),
        text(" fokus  "),
        key("enter"),
        text(" pilih  "),
        key("pgup/pgdn"),
        text(" langkah  "),
        key("[ ]"),
        text(" pinjaman  "),
    ];
    if step == Step::Documents {
        help.push(key("space"));
        help.push(text(" setuju  "));
        help.push(key("^s"));
        help.push(text(" submit  "));
    }
    help.push(key("^q"));
    help.push(text(" keluar"));

    let footer = Paragraph::new(Line::from(help)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(dim())
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(footer, area);
}

/// Rect of `width` x `height` centred in `area`, clamped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_acknowledgment(f: &mut Frame, area: Rect, ack: &Acknowledgment) {
    let popup = centered(area, 64, 11);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(ack.message.clone(), bold(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Referensi: ", dim()),
            Span::styled(ack.reference.clone(), bold(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Pinjaman:  ", dim()),
            Span::styled(
                format_rupiah(ack.loan_amount.value() as i64),
                bold(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tekan Esc untuk menutup",
            dim().add_modifier(ratatui::style::Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" ✓ Pengajuan Terkirim ")
                .title_style(bold(Color::Green))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .border_set(symbols::border::DOUBLE),
        )
        .centered();

    f.render_widget(Clear, popup);
    f.render_widget(panel, popup);
}
