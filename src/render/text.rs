//! Plain text rendering: sample table and bar charts.

use std::fmt::Write;

use crate::analysis::{CountTable, Report};
use crate::error::{Error, Result};
use crate::page_summary::PageCounts;

use super::RenderOptions;

const BAR: char = '█';

/// Render a report as plain text.
///
/// With records: a sample table followed by the gender and children bar
/// charts. Without: a warning and a preview of the extracted text.
pub fn to_text(report: &Report, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    render_report(&mut out, report, options).map_err(|e| Error::Render(e.to_string()))?;
    Ok(out)
}

fn render_report(
    out: &mut String,
    report: &Report,
    options: &RenderOptions,
) -> std::fmt::Result {
    if report.results.is_empty() {
        writeln!(
            out,
            "Não foi possível identificar perfis com a heurística atual."
        )?;
        writeln!(out)?;
        writeln!(out, "Trecho do texto extraído")?;
        let preview: String = report.text().chars().take(options.preview_chars).collect();
        writeln!(out, "{}", preview.trim_end())?;
        return Ok(());
    }

    writeln!(out, "Dados interpretados (amostra)")?;
    writeln!(out, "   #  {:<14}{}", "Gênero", "Possui filhos?")?;
    let sample = report.results.sample(options.sample_size);
    for (i, record) in sample.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<14}{}",
            i + 1,
            record.gender.label(),
            record.children.label()
        )?;
    }
    if report.results.len() > options.sample_size {
        writeln!(
            out,
            "      ... {} registro(s) omitido(s)",
            report.results.len() - options.sample_size
        )?;
    }

    writeln!(out)?;
    out.push_str(&bar_chart(
        "Gráfico: Homens x Mulheres",
        &report.gender_counts,
        options.bar_width,
    ));
    writeln!(out)?;
    out.push_str(&bar_chart(
        "Gráfico: Possuem filhos x Não possuem filhos",
        &report.children_counts,
        options.bar_width,
    ));

    Ok(())
}

/// Horizontal bar chart, largest bar first, each bar annotated with its
/// count.
pub fn bar_chart(title: &str, table: &CountTable, bar_width: usize) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let max = table.max();
    let label_width = table
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);

    for entry in table.iter() {
        // Round to nearest, but never hide a non-zero count.
        let len = (entry.count * bar_width + max / 2)
            .checked_div(max)
            .map_or(0, |n| n.max(1));
        let padding = label_width - entry.label.chars().count();
        out.push_str(&entry.label);
        out.push_str(&" ".repeat(padding + 2));
        out.extend(std::iter::repeat(BAR).take(len));
        out.push_str(&format!(" {}\n", entry.count));
    }

    out
}

/// Render single-page summary counts.
pub fn page_counts_to_text(counts: &PageCounts) -> String {
    format!(
        "Página {}\n  Homens:              {}\n  Mulheres:            {}\n  Advogados com filhos: {}\n",
        counts.page_number, counts.homens, counts.mulheres, counts.filhos
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisPipeline, ResultSet};
    use crate::extract::Extraction;

    fn report(text: &str) -> Report {
        let extraction = Extraction {
            text: text.to_string(),
            backend: Some("lopdf".to_string()),
            attempts: vec![],
        };
        let results = AnalysisPipeline::new().analyze(text);
        Report::new(extraction, results)
    }

    #[test]
    fn test_to_text_with_records() {
        let text = "Nome: Maria Souza, advogada, tem filhos\n\n\
                    Nome: Ana Lima, advogada, sem filhos\n\n\
                    Nome: Rui Alves, advogado, tem filhos";
        let output = to_text(&report(text), &RenderOptions::default()).unwrap();

        assert!(output.contains("Dados interpretados (amostra)"));
        assert!(output.contains("Gráfico: Homens x Mulheres"));
        assert!(output.contains("Gráfico: Possuem filhos x Não possuem filhos"));

        let feminino = output.lines().find(|l| l.starts_with("Feminino")).unwrap();
        assert!(feminino.ends_with(" 2"));
    }

    #[test]
    fn test_to_text_sample_truncated() {
        let text = "Nome: Maria Souza, advogada\n\nNome: Rui Alves, advogado";
        let options = RenderOptions::new().with_sample_size(1);
        let output = to_text(&report(text), &options).unwrap();
        assert!(output.contains("1 registro(s) omitido(s)"));
    }

    #[test]
    fn test_to_text_empty_shows_preview() {
        let extraction = Extraction {
            text: "Relatório sem perfis".to_string(),
            backend: None,
            attempts: vec![],
        };
        let report = Report::new(extraction, ResultSet::default());
        let options = RenderOptions::new().with_preview_chars(9);
        let output = to_text(&report, &options).unwrap();

        assert!(output.contains("Não foi possível identificar perfis"));
        assert!(output.contains("Relatório\n"));
        assert!(!output.contains("sem perfis"));
    }

    #[test]
    fn test_bar_chart_scaling() {
        let text = "Nome: Maria Souza, advogada\n\nNome: Ana Lima, advogada\n\n\
                    Nome: Rita Dias, advogada\n\nNome: Rui Alves, advogado";
        let report = report(text);
        let chart = bar_chart("G", &report.gender_counts, 6);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "G");
        assert_eq!(lines[1], format!("Feminino   {} 3", "█".repeat(6)));
        assert_eq!(lines[2], format!("Masculino  {} 1", "█".repeat(2)));
    }

    #[test]
    fn test_bar_chart_empty_table() {
        assert_eq!(bar_chart("G", &CountTable::default(), 10), "G\n");
    }

    #[test]
    fn test_bar_chart_small_count_keeps_one_block() {
        let text = (0..40)
            .map(|_| "Nome: Maria Souza, advogada")
            .chain(std::iter::once("Nome: Rui Alves, advogado"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chart = bar_chart("G", &report(&text).gender_counts, 4);
        let masculino = chart.lines().find(|l| l.starts_with("Masculino")).unwrap();
        assert_eq!(masculino, "Masculino  █ 1");
    }

    #[test]
    fn test_sample_table_header() {
        let report = report("Nome: Rui Alves, advogado");
        let output = to_text(&report, &RenderOptions::default()).unwrap();
        assert!(output.contains("   #  Gênero        Possui filhos?\n"));
        assert!(output.contains("   1  Masculino     Desconhecido\n"));
    }

    #[test]
    fn test_page_counts_to_text() {
        let output = page_counts_to_text(&PageCounts {
            page_number: 34,
            homens: 1234,
            mulheres: 45,
            filhos: 10,
        });
        assert!(output.starts_with("Página 34"));
        assert!(output.contains("Homens:              1234"));
    }
}
