//! Terminal rendering of results, the gauge, the history table and chart.

use imc_core::gauge::{AXIS_MAX, AXIS_MIN};
use imc_core::{BmiResult, Category, Gauge, HistoryRecord};

/// Gauge track width in cells, one per BMI unit of the axis
const GAUGE_WIDTH: usize = 35;

/// Chart height in rows
const CHART_HEIGHT: usize = 8;

/// Whether output may carry ANSI color escapes
#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub color: bool,
}

impl Style {
    fn paint(&self, hex: &str, text: &str) -> String {
        match (self.color, parse_hex(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
            _ => text.to_string(),
        }
    }

    fn badge(&self, hex: &str, text: &str) -> String {
        match (self.color, parse_hex(hex)) {
            (true, Some((r, g, b))) => {
                format!("\x1b[1;38;2;255;255;255;48;2;{};{};{}m {} \x1b[0m", r, g, b, text)
            }
            _ => format!("[{}]", text),
        }
    }
}

/// Parse `#rrggbb` into its components
fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn print_header() {
    println!("Simulador de IMC");
    println!("Ferramenta simples e profissional para calcular seu Índice de Massa Corporal");
}

/// Result card: value, category badge, advice and gauge
pub fn print_result(result: &BmiResult, style: Style) {
    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│  Seu IMC: {:<30}│", format!("{:.1}", result.bmi));
    println!("╰─────────────────────────────────────────╯");
    println!("  {}", style.badge(result.color, result.label));
    println!("  {}", result.advice);
    println!();
    for line in gauge_lines(&Gauge::for_result(result), style) {
        println!("  {}", line);
    }
    println!();
}

/// Track, band ticks and value marker
fn gauge_lines(gauge: &Gauge, style: Style) -> Vec<String> {
    let position = gauge.position(GAUGE_WIDTH);

    let mut track = String::new();
    for cell in 0..GAUGE_WIDTH {
        if cell <= position {
            track.push_str(&style.paint(gauge.bar_color, "█"));
        } else {
            track.push_str(&style.paint(gauge.band_color_at(cell, GAUGE_WIDTH), "░"));
        }
    }

    let mut ticks = vec![' '; GAUGE_WIDTH];
    for band in gauge.bands.iter().skip(1) {
        let cell = ((band.from - AXIS_MIN) / (AXIS_MAX - AXIS_MIN) * GAUGE_WIDTH as f64) as usize;
        if let Some(slot) = ticks.get_mut(cell) {
            *slot = '|';
        }
    }
    let ticks: String = ticks.into_iter().collect();

    let mut marker = " ".repeat(position);
    marker.push('▲');
    marker.push_str(&format!(" {:.1}", gauge.value));

    vec![
        format!("{:>2} {} {}", AXIS_MIN, track, AXIS_MAX),
        format!("   {}", ticks),
        format!("   {}", marker),
    ]
}

/// History table, one row per record in the given order
pub fn print_history(records: &[&HistoryRecord], style: Style) {
    if records.is_empty() {
        println!("Nenhum cálculo ainda. Use 'calc' para calcular seu IMC.");
        return;
    }

    println!(
        "{:>3}  {:>5}  {:<17}  {:<18}  {:>10}  {:>12}  {:>7}  {:>8}  {:>5}  {}",
        "#", "idade", "genero", "unidade", "peso_input", "altura_input", "peso_kg", "altura_m",
        "imc", "categoria"
    );
    for (i, record) in records.iter().enumerate() {
        let measurement = record.measurement();
        let result = record.result();
        println!(
            "{:>3}  {:>5}  {:<17}  {:<18}  {:>10.1}  {:>12.2}  {:>7.2}  {:>8.2}  {:>5.1}  {}",
            i + 1,
            measurement.age,
            measurement.gender.label(),
            measurement.unit_system.label(),
            measurement.weight,
            measurement.height,
            record.canonical().weight_kg(),
            record.canonical().height_m(),
            result.bmi,
            style.paint(result.color, result.label)
        );
    }
}

/// Line chart of BMI over record order
pub fn print_chart(series: &[f64]) {
    for line in chart_lines(series) {
        println!("{}", line);
    }
}

fn chart_lines(series: &[f64]) -> Vec<String> {
    if series.is_empty() {
        return vec!["Nenhum cálculo ainda.".to_string()];
    }

    let mut low = series.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if high - low < 1.0 {
        low -= 0.5;
        high += 0.5;
    }

    let row_of = |value: f64| -> usize {
        let ratio = (value - low) / (high - low);
        ((1.0 - ratio) * (CHART_HEIGHT - 1) as f64).round() as usize
    };
    let rows: Vec<usize> = series.iter().map(|&v| row_of(v)).collect();

    let mut lines = Vec::with_capacity(CHART_HEIGHT + 2);
    for row in 0..CHART_HEIGHT {
        let label = if row == 0 {
            format!("{:>5.1}", high)
        } else if row == CHART_HEIGHT - 1 {
            format!("{:>5.1}", low)
        } else {
            " ".repeat(5)
        };

        let mut line = format!("{} ┤", label);
        for (i, &point_row) in rows.iter().enumerate() {
            let cell = if point_row == row {
                '●'
            } else if i > 0 && between(row, rows[i - 1], point_row) {
                '│'
            } else {
                ' '
            };
            line.push(' ');
            line.push(cell);
        }
        lines.push(line.trim_end().to_string());
    }

    let axis: String = "──".repeat(series.len());
    lines.push(format!("{} └{}", " ".repeat(5), axis));
    lines.push(format!("{}   1..{} (ordem dos registros)", " ".repeat(5), series.len()));
    lines
}

/// True when `row` lies strictly between two plotted rows
fn between(row: usize, a: usize, b: usize) -> bool {
    let (top, bottom) = if a < b { (a, b) } else { (b, a) };
    row > top && row < bottom
}

/// Category reference table used by `about`
pub fn print_categories(style: Style) {
    println!("{:<20}  {:<20}  {:<18}  {}", "IMC", "Categoria", "", "Orientação");
    for category in Category::ALL {
        let range = match category.range() {
            (None, Some(hi)) => format!("< {}", hi),
            (Some(lo), Some(hi)) => format!("{} a < {}", lo, hi),
            (Some(lo), None) => format!(">= {}", lo),
            (None, None) => String::new(),
        };
        println!(
            "{:<20}  {}  {:<18}  {}",
            range,
            style.paint(category.color(), &format!("{:<20}", category.label())),
            format!("({})", category.english_name()),
            category.advice()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imc_core::classify;

    const PLAIN: Style = Style { color: false };

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#34d399"), Some((0x34, 0xd3, 0x99)));
        assert_eq!(parse_hex("34d399"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_plain_style_has_no_escapes() {
        assert_eq!(PLAIN.paint("#ffffff", "x"), "x");
        assert_eq!(PLAIN.badge("#ffffff", "Sobrepeso"), "[Sobrepeso]");
        assert!(Style { color: true }.paint("#ffffff", "x").starts_with("\x1b["));
    }

    #[test]
    fn test_gauge_marker_position() {
        let gauge = Gauge::for_result(&classify(70.0, 1.75).unwrap());
        let lines = gauge_lines(&gauge, PLAIN);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("10 "));
        assert!(lines[0].ends_with(" 45"));
        assert_eq!(lines[0].chars().filter(|&c| c == '█').count(), 13);
        assert!(lines[2].ends_with("▲ 22.9"));
        assert_eq!(lines[1].chars().filter(|&c| c == '|').count(), 4);
    }

    #[test]
    fn test_chart_plots_every_point() {
        let lines = chart_lines(&[22.9, 22.7, 38.1, 15.4]);
        let points: usize = lines.iter().map(|l| l.matches('●').count()).sum();
        assert_eq!(points, 4);
        assert!(lines[0].starts_with(" 38.1"));
        assert!(lines[CHART_HEIGHT - 1].starts_with(" 15.4"));
    }

    #[test]
    fn test_chart_flat_series() {
        let lines = chart_lines(&[22.9, 22.9]);
        let points: usize = lines.iter().map(|l| l.matches('●').count()).sum();
        assert_eq!(points, 2);
    }

    #[test]
    fn test_chart_empty() {
        assert_eq!(chart_lines(&[]).len(), 1);
    }
}
