//! PDF report rendering for filtered submissions. Pure formatting helpers
//! live here so they can be tested without touching a PDF.

use chrono::{DateTime, NaiveDate, Utc};
use printpdf::{
    BuiltinFont, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt,
    TextItem,
};

use crate::errors::AppError;
use crate::fields;
use crate::models::submission::Submission;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE_H: f32 = 5.0;
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 9.0;

/// "1234.5" -> "R$ 1.234,50".
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// ISO date -> dd/mm/yyyy.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_datetime(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

fn label_of(name: &str) -> &'static str {
    fields::lookup(name).map(|s| s.label).unwrap_or("")
}

/// Every catalog attribute of a record as (label, rendered value) rows,
/// with "N/A" standing in for anything absent.
pub fn display_rows(record: &Submission) -> Vec<(&'static str, String)> {
    let text = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
    let date = |v: &Option<NaiveDate>| v.map(format_date);

    let raw: Vec<(&str, Option<String>)> = vec![
        ("nomeCompleto", text(&record.nome_completo)),
        ("nomeSocial", text(&record.nome_social)),
        ("sexo", text(&record.sexo)),
        ("situacaoFuncional", text(&record.situacao_funcional)),
        ("matricula", text(&record.matricula)),
        ("nomeMae", text(&record.nome_mae)),
        ("dataAdmissao", date(&record.data_admissao)),
        ("dataNascimento", date(&record.data_nascimento)),
        ("rg", text(&record.rg)),
        ("cpf", text(&record.cpf)),
        ("lotacao", text(&record.lotacao)),
        ("setor", text(&record.setor)),
        ("cargo", text(&record.cargo)),
        ("salarioBase", record.salario_base.map(format_currency)),
        ("enderecoResidencial", text(&record.endereco_residencial)),
        ("bairro", text(&record.bairro)),
        ("cidade", text(&record.cidade)),
        ("estado", text(&record.estado)),
        ("cep", text(&record.cep)),
        ("telefoneFixo", text(&record.telefone_fixo)),
        ("celular", text(&record.celular)),
        ("whatsapp", text(&record.whatsapp)),
        ("email", text(&record.email)),
        ("bancoRecebimento", text(&record.banco_recebimento)),
        ("observacoes", text(&record.observacoes)),
        (
            "aceitaTermos",
            Some(if record.aceita_termos { "Sim" } else { "Não" }.to_string()),
        ),
        ("mensagem", text(&record.mensagem)),
    ];

    raw.into_iter()
        .map(|(name, value)| (label_of(name), value.unwrap_or_else(|| "N/A".to_string())))
        .collect()
}

fn point(x: f32, y: f32) -> Point {
    Point {
        x: Mm(x).into(),
        y: Mm(y).into(),
    }
}

fn text_ops(ops: &mut Vec<Op>, x: f32, y: f32, size: f32, font: BuiltinFont, text: &str) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor { pos: point(x, y) });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

fn rect_ops(ops: &mut Vec<Op>, x0: f32, y0: f32, x1: f32, y1: f32) {
    let corners = [
        point(x0, y0),
        point(x1, y0),
        point(x1, y1),
        point(x0, y1),
    ];
    ops.push(Op::DrawLine {
        line: Line {
            points: corners
                .into_iter()
                .map(|p| LinePoint { p, bezier: false })
                .collect(),
            is_closed: true,
        },
    });
}

/// Render the report for a non-empty selection. An empty one is a
/// NotFound, never a blank PDF.
pub fn build(form_name: &str, records: &[Submission]) -> Result<Vec<u8>, AppError> {
    if records.is_empty() {
        return Err(AppError::not_found(
            "Nenhum cadastro encontrado para os critérios informados.",
        ));
    }
    Ok(render(form_name, records))
}

/// Render the report: a title page header, then one boxed section per
/// record with every attribute. Records never split across pages.
pub fn render(form_name: &str, records: &[Submission]) -> Vec<u8> {
    let mut doc = PdfDocument::new("Relatório de Cadastros");
    let mut pages: Vec<PdfPage> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();
    let mut y = PAGE_H - MARGIN;

    text_ops(
        &mut ops,
        MARGIN,
        y,
        TITLE_SIZE,
        BuiltinFont::HelveticaBold,
        &format!("Relatório de Cadastros: {form_name}"),
    );
    y -= LINE_H * 1.5;
    text_ops(
        &mut ops,
        MARGIN,
        y,
        BODY_SIZE,
        BuiltinFont::Helvetica,
        &format!(
            "Gerado em {} | {} cadastro(s)",
            format_datetime(Utc::now()),
            records.len()
        ),
    );
    y -= LINE_H * 2.0;

    for record in records {
        let rows = display_rows(record);
        // heading line plus one line per attribute, with box padding
        let needed = LINE_H * (rows.len() as f32 + 1.0) + 6.0;
        if y - needed < MARGIN {
            pages.push(PdfPage::new(Mm(PAGE_W), Mm(PAGE_H), ops));
            ops = Vec::new();
            y = PAGE_H - MARGIN;
        }

        let box_top = y + 2.0;
        text_ops(
            &mut ops,
            MARGIN + 2.0,
            y - LINE_H,
            HEADING_SIZE,
            BuiltinFont::HelveticaBold,
            &format!(
                "Cadastro #{} ({})",
                record.id,
                format_datetime(record.submitted_at)
            ),
        );
        y -= LINE_H * 1.6;

        for (label, value) in &rows {
            y -= LINE_H;
            text_ops(
                &mut ops,
                MARGIN + 2.0,
                y,
                BODY_SIZE,
                BuiltinFont::Helvetica,
                &format!("{label}: {value}"),
            );
        }

        y -= 2.0;
        rect_ops(&mut ops, MARGIN, y, PAGE_W - MARGIN, box_top);
        y -= LINE_H * 1.5;
    }

    pages.push(PdfPage::new(Mm(PAGE_W), Mm(PAGE_H), ops));
    doc.with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut Vec::new())
}
