use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use corpora_client::chunking::ChunkingParams;
use corpora_client::{MAX_BATCH_FILES, SUPPORTED_FORMATS, WorkflowStage};
use corpora_core::models::{DocumentStatus, KnowledgeBase, RetrievalMode};

use crate::state::{
    CHUNK_SIZE_MAX, CHUNK_SIZE_MIN, CHUNK_SIZE_STEP, ConfigField, DetailTab, PromptKind, Screen,
    UploadField,
};
use crate::theme;

use super::{App, DetailState};

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(7),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        match self.screen {
            Screen::KnowledgeBases => self.draw_knowledge_bases(frame, chunks[1]),
            Screen::Create => self.draw_create(frame, chunks[1]),
            Screen::Detail => self.draw_detail(frame, chunks[1]),
            Screen::Upload => self.draw_upload(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        if let Some(kind) = self.prompt.kind {
            self.draw_prompt_overlay(frame, kind);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" corpora ", theme::header_title()),
            Span::raw("· "),
            Span::styled(self.status.as_str(), theme::label()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(self.key_hints(), theme::label()))];
        for notice in &self.notices {
            lines.push(Line::from(Span::styled(notice.as_str(), theme::notice())));
        }
        frame.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }), inner);
    }

    fn key_hints(&self) -> &'static str {
        match self.screen {
            Screen::KnowledgeBases => {
                "↑/↓ select · enter open · n new · d delete · r refresh · q quit"
            }
            Screen::Create => match self.workflow.stage().position() {
                0 => "a add file · ↑/↓ select · x remove · enter next · esc cancel",
                1 => "tab field · type text · ←/→ adjust sliders · enter create · esc back",
                _ => "enter open · n create another · esc done",
            },
            Screen::Detail => {
                match self.detail.as_ref().map(|d| d.tab).unwrap_or_default() {
                    DetailTab::Documents => {
                        "tab search · ↑/↓ select · / filter · u upload · p preview · d delete · e rename · r refresh · esc back"
                    }
                    DetailTab::Search => {
                        "tab documents · / edit query · ←/→ result count · m mode · e rename · enter search · esc back"
                    }
                }
            }
            Screen::Upload => {
                "a add file · ↑/↓ select · x remove · tab slider · ←/→ adjust · enter upload · esc cancel"
            }
        }
    }

    fn draw_knowledge_bases(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Knowledge Bases")
            .borders(Borders::ALL)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.knowledge_bases.is_empty() {
            let empty = Paragraph::new("no knowledge bases yet — press n to create one")
                .style(theme::label());
            frame.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .knowledge_bases
            .iter()
            .enumerate()
            .map(|(i, kb)| knowledge_base_item(kb, i == self.kb_selected))
            .collect();
        frame.render_widget(List::new(items), inner);
    }

    fn draw_create(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(4)])
            .split(area);

        frame.render_widget(Paragraph::new(self.step_indicator()), chunks[0]);

        match self.workflow.stage() {
            WorkflowStage::Upload => self.draw_create_upload(frame, chunks[1]),
            WorkflowStage::Config => self.draw_create_config(frame, chunks[1]),
            WorkflowStage::Complete {
                knowledge_base,
                params,
            } => draw_create_complete(frame, chunks[1], knowledge_base, *params),
        }
    }

    fn step_indicator(&self) -> Line<'static> {
        let position = self.workflow.stage().position();
        let labels = ["1 Upload", "2 Configure", "3 Complete"];
        let mut spans = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            let style = if i < position {
                theme::status_ok()
            } else if i == position {
                theme::header_title()
            } else {
                theme::disabled()
            };
            spans.push(Span::styled(label.to_string(), style));
            if i < labels.len() - 1 {
                spans.push(Span::styled("  >  ".to_string(), theme::disabled()));
            }
        }
        Line::from(spans)
    }

    fn draw_create_upload(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Select documents")
            .borders(Borders::ALL)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("supported: {}", SUPPORTED_FORMATS.join(", ")),
                theme::label(),
            )),
            Line::from(Span::styled(
                format!("up to {MAX_BATCH_FILES} files, 15 MB each"),
                theme::label(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("selected files ({}/{MAX_BATCH_FILES})", self.workflow.files().len()),
                theme::value(),
            )),
        ];
        for (i, file) in self.workflow.files().iter().enumerate() {
            let style = if i == self.file_selected {
                theme::selected()
            } else {
                theme::value()
            };
            lines.push(Line::from(Span::styled(
                format!("  {}  {:.2} MB", file.name, file.size_mb()),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_create_config(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Configure knowledge base")
            .borders(Borders::ALL)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let params = self.workflow.params();
        let mut lines = vec![
            field_line("Name *", &self.name_input, self.create_field == ConfigField::Name),
            field_line(
                "Description",
                &self.description_input,
                self.create_field == ConfigField::Description,
            ),
            Line::from(""),
        ];
        lines.extend(chunking_lines(
            params,
            self.create_field == ConfigField::ChunkSize,
            self.create_field == ConfigField::ChunkOverlap,
        ));
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(4),
            ])
            .split(area);

        let kb = &detail.knowledge_base;
        let info = vec![
            Line::from(Span::styled(kb.name.clone(), theme::value())),
            Line::from(Span::styled(
                kb.description.clone().unwrap_or_default(),
                theme::label(),
            )),
            Line::from(Span::styled(
                format!(
                    "{} documents · created {}",
                    kb.document_count,
                    kb.created_at.format("%Y-%m-%d")
                ),
                theme::label(),
            )),
        ];
        frame.render_widget(Paragraph::new(Text::from(info)), chunks[0]);

        let tabs = Line::from(vec![
            Span::styled(
                DetailTab::Documents.label(),
                theme::border(detail.tab == DetailTab::Documents),
            ),
            Span::raw("  |  "),
            Span::styled(
                DetailTab::Search.label(),
                theme::border(detail.tab == DetailTab::Search),
            ),
        ]);
        frame.render_widget(Paragraph::new(tabs), chunks[1]);

        match detail.tab {
            DetailTab::Documents => draw_documents_tab(frame, chunks[2], detail),
            DetailTab::Search => draw_search_tab(frame, chunks[2], detail),
        }
    }

    fn draw_upload(&self, frame: &mut Frame, area: Rect) {
        let Some(draft) = self.upload.as_ref() else {
            return;
        };
        let title = self
            .detail
            .as_ref()
            .map(|d| format!("Upload documents — {}", d.knowledge_base.name))
            .unwrap_or_else(|| "Upload documents".to_string());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(Span::styled(
            format!("selected files ({}/{MAX_BATCH_FILES})", draft.files.len()),
            theme::value(),
        ))];
        for (i, file) in draft.files.iter().enumerate() {
            let style = if i == draft.selected {
                theme::selected()
            } else {
                theme::value()
            };
            lines.push(Line::from(Span::styled(
                format!("  {}  {:.2} MB", file.name, file.size_mb()),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.extend(chunking_lines(
            draft.params,
            draft.field == UploadField::ChunkSize,
            draft.field == UploadField::ChunkOverlap,
        ));
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_prompt_overlay(&self, frame: &mut Frame, kind: PromptKind) {
        let area = centered_rect(60, 25, frame.area());
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title("Input")
            .borders(Borders::ALL)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let name = self.prompt.target_name.clone().unwrap_or_default();
        let title = match kind {
            PromptKind::AddCreateFile | PromptKind::AddUploadFile => "Path to file".to_string(),
            PromptKind::FilterDocuments => "Filter documents (blank clears)".to_string(),
            PromptKind::SearchQuery => "Search query".to_string(),
            PromptKind::RenameKnowledgeBase => "New knowledge base name".to_string(),
            PromptKind::ConfirmDeleteKnowledgeBase => {
                format!("Type yes to delete knowledge base {name:?}")
            }
            PromptKind::ConfirmDeleteDocument => format!("Type yes to delete document {name:?}"),
        };
        let p = Paragraph::new(format!("{}\n\n> {}", title, self.prompt.buffer));
        frame.render_widget(p, inner);
    }
}

fn knowledge_base_item(kb: &KnowledgeBase, is_selected: bool) -> ListItem<'static> {
    let name_style = if is_selected {
        theme::selected()
    } else {
        theme::value()
    };
    let mut lines = vec![Line::from(Span::styled(kb.name.clone(), name_style))];
    if let Some(description) = &kb.description {
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate(description, 80)),
            theme::label(),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "  {} documents · created {}",
            kb.document_count,
            kb.created_at.format("%Y-%m-%d")
        ),
        theme::label(),
    )));
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

fn draw_create_complete(
    frame: &mut Frame,
    area: Rect,
    knowledge_base: &KnowledgeBase,
    params: ChunkingParams,
) {
    let block = Block::default()
        .title("Done")
        .borders(Borders::ALL)
        .border_style(theme::status_ok());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let preview = params.derive();
    let lines = vec![
        Line::from(Span::styled(
            "Knowledge base created".to_string(),
            theme::status_ok(),
        )),
        Line::from(""),
        Line::from(Span::styled(knowledge_base.name.clone(), theme::value())),
        Line::from(Span::styled(
            format!(
                "chunk size {} · overlap {} · stride {}",
                params.chunk_size(),
                params.chunk_overlap(),
                preview.effective_stride
            ),
            theme::label(),
        )),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn draw_documents_tab(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("filter: {:?}", detail.documents.filter()),
            theme::label(),
        )),
        Line::from(Span::styled(
            format!(
                "{:<32} {:<6} {:>9} {:>7} {:>8}  {}",
                "name", "type", "size", "chunks", "recalls", "status"
            ),
            theme::label(),
        )),
    ];

    let filtered = detail.documents.filtered();
    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "no documents".to_string(),
            theme::label(),
        )));
    }
    for (i, doc) in filtered.iter().enumerate() {
        let row = format!(
            "{:<32} {:<6} {:>6.2} MB {:>7} {:>8}  ",
            truncate(&doc.name, 32),
            doc.file_type,
            doc.file_size as f64 / 1024.0 / 1024.0,
            doc.chunk_count,
            doc.recall_count,
        );
        let row_style = if i == detail.doc_selected {
            theme::selected()
        } else {
            theme::value()
        };
        lines.push(Line::from(vec![
            Span::styled(row, row_style),
            Span::styled(doc.status.as_str(), status_style(doc.status)),
        ]));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn draw_search_tab(frame: &mut Frame, area: Rect, detail: &DetailState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mode_label = match detail.mode {
        RetrievalMode::Vector => "vector search",
        RetrievalMode::Hybrid => "hybrid search",
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("query: ".to_string(), theme::label()),
            Span::styled(detail.query.clone(), theme::value()),
        ]),
        Line::from(vec![
            Span::styled(format!("results: {} · mode: ", detail.top_k), theme::label()),
            Span::styled(mode_label.to_string(), theme::value()),
            Span::styled("  [hybrid coming soon]".to_string(), theme::disabled()),
        ]),
        Line::from(""),
    ];

    match detail.search.results() {
        None => lines.push(Line::from(Span::styled(
            "press / to enter a query".to_string(),
            theme::label(),
        ))),
        Some(response) if response.results.is_empty() => {
            lines.push(Line::from(Span::styled(
                format!("no results for {:?}", response.query),
                theme::label(),
            )));
        }
        Some(response) => {
            lines.push(Line::from(Span::styled(
                format!("{} results for {:?}", response.total_count, response.query),
                theme::value(),
            )));
            lines.push(Line::from(""));
            for result in &response.results {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>5.1}%  ", result.similarity_score * 100.0),
                        theme::status_ok(),
                    ),
                    Span::styled(result.document_name.clone(), theme::value()),
                    Span::styled(
                        format!(" · chunk {}", result.chunk_index),
                        theme::label(),
                    ),
                ]));
                let excerpt = result.content.replace('\n', " ");
                lines.push(Line::from(Span::styled(
                    format!("       {}", truncate(&excerpt, 160)),
                    theme::label(),
                )));
                lines.push(Line::from(""));
            }
        }
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }),
        inner,
    );
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<14}"), theme::border(focused)),
        Span::styled(format!("{value}{cursor}"), theme::value()),
    ])
}

fn chunking_lines(
    params: ChunkingParams,
    size_focused: bool,
    overlap_focused: bool,
) -> Vec<Line<'static>> {
    let preview = params.derive();
    let overlap_max = (params.chunk_size() - 1).min(512);
    vec![
        Line::from(vec![
            Span::styled("Chunk size    ".to_string(), theme::border(size_focused)),
            Span::styled(
                slider(params.chunk_size(), CHUNK_SIZE_MIN, CHUNK_SIZE_MAX, CHUNK_SIZE_STEP),
                theme::value(),
            ),
            Span::styled(format!("  {}", params.chunk_size()), theme::value()),
        ]),
        Line::from(vec![
            Span::styled("Chunk overlap ".to_string(), theme::border(overlap_focused)),
            Span::styled(slider(params.chunk_overlap(), 0, overlap_max, 50), theme::value()),
            Span::styled(format!("  {}", params.chunk_overlap()), theme::value()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "preview: {} chars per chunk · {} overlap ({:.1}%) · {} stride",
                params.chunk_size(),
                params.chunk_overlap(),
                preview.overlap_ratio_percent,
                preview.effective_stride
            ),
            theme::label(),
        )),
    ]
}

fn status_style(status: DocumentStatus) -> ratatui::style::Style {
    match status {
        DocumentStatus::Completed => theme::status_ok(),
        DocumentStatus::Processing => theme::status_warn(),
        DocumentStatus::Failed => theme::status_err(),
    }
}

fn slider(value: u32, min: u32, max: u32, step: u32) -> String {
    let ticks = ((max - min) / step + 1).max(1);
    let filled = value.saturating_sub(min).div_ceil(step).min(ticks - 1) + 1;
    let mut bar = String::new();
    for i in 0..ticks {
        bar.push(if i < filled { '▰' } else { '▱' });
    }
    bar
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
