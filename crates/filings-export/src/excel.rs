use filings_core::{FilingsError, Result, StatementRecord};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::context::ExportContext;
use crate::table::{StatementTable, TableRow, tables};

const PERIOD_COLUMN_WIDTH: f64 = 16.0;

struct Formats {
    title: Format,
    header: Format,
    section: Format,
    number: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Thin),
            section: Format::new()
                .set_bold()
                .set_italic()
                .set_background_color(Color::RGB(0xE0E0E0)),
            number: Format::new().set_num_format("#,##0.00"),
        }
    }
}

/// Render records as an `.xlsx` workbook, one worksheet per statement kind.
pub(crate) fn to_excel(ctx: &ExportContext, records: &[StatementRecord]) -> Result<Vec<u8>> {
    build(ctx, records).map_err(|e| FilingsError::Export(e.to_string()))
}

fn build(ctx: &ExportContext, records: &[StatementRecord]) -> std::result::Result<Vec<u8>, XlsxError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    let tables = tables(records);
    if tables.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(ctx.statement_type.short_name())?;
        sheet.write_string_with_format(0, 0, ctx.heading(ctx.statement_type.title()), &formats.title)?;
    }
    for table in &tables {
        write_table(workbook.add_worksheet(), ctx, table, &formats)?;
    }

    workbook.save_to_buffer()
}

fn write_table(
    sheet: &mut Worksheet,
    ctx: &ExportContext,
    table: &StatementTable,
    formats: &Formats,
) -> std::result::Result<(), XlsxError> {
    sheet.set_name(table.kind.short_name())?;
    let last_col = table.periods.len() as u16;

    sheet.merge_range(0, 0, 0, last_col, &ctx.heading(table.kind.title()), &formats.title)?;

    sheet.write_string_with_format(1, 0, "Line item", &formats.header)?;
    for (idx, period) in table.periods.iter().enumerate() {
        let col = idx as u16 + 1;
        sheet.write_string_with_format(1, col, period.to_string(), &formats.header)?;
        sheet.set_column_width(col, PERIOD_COLUMN_WIDTH)?;
    }

    let mut label_width = "Line item".len();
    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = idx as u32 + 2;
        match row {
            TableRow::Section(title) => {
                sheet.write_string_with_format(row_num, 0, *title, &formats.section)?;
                for col in 1..=last_col {
                    sheet.write_blank(row_num, col, &formats.section)?;
                }
                label_width = label_width.max(title.len());
            }
            TableRow::Item { label, values, .. } => {
                sheet.write_string(row_num, 0, label)?;
                for (col, value) in values.iter().enumerate() {
                    if let Some(value) = value {
                        sheet.write_number_with_format(row_num, col as u16 + 1, *value, &formats.number)?;
                    }
                }
                label_width = label_width.max(label.chars().count());
            }
        }
    }
    sheet.set_column_width(0, label_width as f64 + 2.0)?;

    Ok(())
}
