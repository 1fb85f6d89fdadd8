//! Chart XML writer.
//!
//! Emits a `c:chartSpace` document for a [`Chart`]. Elements are written in
//! schema order; PowerPoint rejects charts whose children are out of order.
//!
//! When the chart is backed by an embedded workbook, series names,
//! categories and values are written as sheet references with cached
//! values; otherwise they are written as literals.

use super::models::{Chart, ChartSeries, ChartType};
use super::workbook::{SHEET_NAME, column_letter};
use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use std::io::Write;

const CATEGORY_AXIS_ID: u32 = 500_000_001;
const VALUE_AXIS_ID: u32 = 500_000_002;

/// Write a chart to XML.
///
/// `workbook_rel_id` is the relationship id of the embedded workbook, when
/// there is one.
pub fn write_chart<W: Write>(
    writer: &mut W,
    chart: &Chart,
    workbook_rel_id: Option<&str>,
) -> std::io::Result<()> {
    write!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
    )?;
    write!(
        writer,
        r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
        namespace::DML_CHART,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS
    )?;
    write!(writer, r#"<c:date1904 val="0"/>"#)?;
    write!(writer, r#"<c:lang val="en-US"/>"#)?;
    write!(writer, r#"<c:roundedCorners val="0"/>"#)?;

    write!(writer, "<c:chart>")?;
    write!(writer, r#"<c:autoTitleDeleted val="1"/>"#)?;
    write_plot_area(writer, chart, workbook_rel_id.is_some())?;

    if chart.show_legend {
        write!(writer, "<c:legend>")?;
        let pos = if chart.chart_type == ChartType::Pie { "r" } else { "b" };
        write!(writer, r#"<c:legendPos val="{}"/>"#, pos)?;
        write!(writer, r#"<c:overlay val="0"/>"#)?;
        write!(writer, "</c:legend>")?;
    }

    write!(writer, r#"<c:plotVisOnly val="1"/>"#)?;
    write!(writer, r#"<c:dispBlanksAs val="gap"/>"#)?;
    write!(writer, "</c:chart>")?;

    // transparent chart area over the slide background
    write!(writer, "<c:spPr><a:noFill/><a:ln><a:noFill/></a:ln></c:spPr>")?;
    if let Some(color) = chart.text_color {
        write_text_props(writer, color, 1200)?;
    }

    if let Some(r_id) = workbook_rel_id {
        write!(
            writer,
            r#"<c:externalData r:id="{}"><c:autoUpdate val="0"/></c:externalData>"#,
            escape_xml(r_id)
        )?;
    }

    write!(writer, "</c:chartSpace>")?;
    Ok(())
}

/// Serialize a chart into a byte buffer.
pub fn chart_to_bytes(chart: &Chart, workbook_rel_id: Option<&str>) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(2048 + chart.series.len() * 1024);
    write_chart(&mut out, chart, workbook_rel_id)?;
    Ok(out)
}

fn write_plot_area<W: Write>(writer: &mut W, chart: &Chart, linked: bool) -> std::io::Result<()> {
    write!(writer, "<c:plotArea>")?;
    write!(writer, "<c:layout/>")?;

    match chart.chart_type {
        ChartType::Bar => {
            write!(writer, "<c:barChart>")?;
            write!(writer, r#"<c:barDir val="col"/>"#)?;
            write!(writer, r#"<c:grouping val="clustered"/>"#)?;
            write!(writer, r#"<c:varyColors val="0"/>"#)?;
            write_all_series(writer, chart, linked)?;
            write!(writer, r#"<c:gapWidth val="150"/>"#)?;
            write_axis_ids(writer)?;
            write!(writer, "</c:barChart>")?;
        },
        ChartType::Line => {
            write!(writer, "<c:lineChart>")?;
            write!(writer, r#"<c:grouping val="standard"/>"#)?;
            write!(writer, r#"<c:varyColors val="0"/>"#)?;
            write_all_series(writer, chart, linked)?;
            write!(writer, r#"<c:marker val="1"/>"#)?;
            write_axis_ids(writer)?;
            write!(writer, "</c:lineChart>")?;
        },
        ChartType::Pie => {
            write!(writer, "<c:pieChart>")?;
            write!(writer, r#"<c:varyColors val="1"/>"#)?;
            write_all_series(writer, chart, linked)?;
            write!(writer, r#"<c:firstSliceAng val="0"/>"#)?;
            write!(writer, "</c:pieChart>")?;
        },
    }

    if chart.chart_type != ChartType::Pie {
        write_axes(writer, chart)?;
    }

    write!(writer, "</c:plotArea>")?;
    Ok(())
}

fn write_all_series<W: Write>(writer: &mut W, chart: &Chart, linked: bool) -> std::io::Result<()> {
    let rows = chart.row_count();
    for (index, series) in chart.series.iter().enumerate() {
        write_series(writer, chart, series, index, rows, linked)?;
    }
    Ok(())
}

fn write_series<W: Write>(
    writer: &mut W,
    chart: &Chart,
    series: &ChartSeries,
    index: usize,
    rows: usize,
    linked: bool,
) -> std::io::Result<()> {
    let column = column_letter(index + 1);
    let fill = series.fill(index);

    write!(writer, "<c:ser>")?;
    write!(writer, r#"<c:idx val="{}"/><c:order val="{}"/>"#, index, index)?;

    write!(writer, "<c:tx>")?;
    if linked {
        write!(
            writer,
            "<c:strRef><c:f>{}!${}$1</c:f>",
            SHEET_NAME, column
        )?;
        write!(
            writer,
            r#"<c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>{}</c:v></c:pt></c:strCache>"#,
            escape_xml(&series.name)
        )?;
        write!(writer, "</c:strRef>")?;
    } else {
        write!(writer, "<c:v>{}</c:v>", escape_xml(&series.name))?;
    }
    write!(writer, "</c:tx>")?;

    // series body
    match chart.chart_type {
        ChartType::Line => {
            write!(writer, r#"<c:spPr><a:ln w="28575" cap="rnd">"#)?;
            write_solid_fill(writer, fill)?;
            write!(writer, "<a:round/></a:ln></c:spPr>")?;
            write!(writer, "<c:marker>")?;
            write!(writer, r#"<c:symbol val="circle"/><c:size val="5"/>"#)?;
            write!(writer, "<c:spPr>")?;
            write_solid_fill(writer, fill)?;
            write!(writer, "</c:spPr>")?;
            write!(writer, "</c:marker>")?;
        },
        ChartType::Bar => {
            write!(writer, "<c:spPr>")?;
            write_solid_fill(writer, fill)?;
            write!(writer, "</c:spPr>")?;
            write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;
        },
        ChartType::Pie => {
            write!(writer, "<c:spPr>")?;
            write_solid_fill(writer, fill)?;
            write!(writer, "</c:spPr>")?;
        },
    }

    let vary = chart.chart_type.varies_colors();
    for category in 0..rows {
        let Some(color) = series.point_fill(category, vary) else {
            continue;
        };
        write!(writer, "<c:dPt>")?;
        write!(writer, r#"<c:idx val="{}"/>"#, category)?;
        match chart.chart_type {
            ChartType::Bar => write!(writer, r#"<c:invertIfNegative val="0"/>"#)?,
            ChartType::Line => write!(writer, r#"<c:marker><c:symbol val="circle"/></c:marker>"#)?,
            ChartType::Pie => write!(writer, r#"<c:bubble3D val="0"/>"#)?,
        }
        write!(writer, "<c:spPr>")?;
        write_solid_fill(writer, color)?;
        write!(writer, "</c:spPr>")?;
        write!(writer, "</c:dPt>")?;
    }

    write_data_labels(writer, chart)?;

    // categories
    write!(writer, "<c:cat>")?;
    if linked {
        write!(
            writer,
            "<c:strRef><c:f>{}!$A$2:$A${}</c:f>",
            SHEET_NAME,
            rows + 1
        )?;
        write_str_points(writer, "strCache", &chart.categories, rows)?;
        write!(writer, "</c:strRef>")?;
    } else {
        write_str_points(writer, "strLit", &chart.categories, rows)?;
    }
    write!(writer, "</c:cat>")?;

    // values
    write!(writer, "<c:val>")?;
    if linked {
        write!(
            writer,
            "<c:numRef><c:f>{}!${}$2:${}${}</c:f>",
            SHEET_NAME,
            column,
            column,
            rows + 1
        )?;
        write_num_points(writer, "numCache", &series.values, rows)?;
        write!(writer, "</c:numRef>")?;
    } else {
        write_num_points(writer, "numLit", &series.values, rows)?;
    }
    write!(writer, "</c:val>")?;

    if chart.chart_type == ChartType::Line {
        write!(writer, r#"<c:smooth val="0"/>"#)?;
    }

    write!(writer, "</c:ser>")?;
    Ok(())
}

fn write_data_labels<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:dLbls>")?;
    if let Some(color) = chart.text_color {
        write_text_props(writer, color, 1000)?;
    }
    let show = |flag: bool| if flag { "1" } else { "0" };
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="{}"/>"#, show(chart.show_values))?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="0"/>"#)?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

fn write_str_points<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[String],
    rows: usize,
) -> std::io::Result<()> {
    write!(writer, "<c:{}>", tag)?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, rows)?;
    for (idx, value) in values.iter().enumerate().take(rows) {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            idx,
            escape_xml(value)
        )?;
    }
    write!(writer, "</c:{}>", tag)?;
    Ok(())
}

fn write_num_points<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[f64],
    rows: usize,
) -> std::io::Result<()> {
    let mut buffer = ryu::Buffer::new();
    write!(writer, "<c:{}>", tag)?;
    write!(writer, "<c:formatCode>General</c:formatCode>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, rows)?;
    for (idx, value) in values.iter().enumerate().take(rows) {
        // non-finite values are left as gaps
        if !value.is_finite() {
            continue;
        }
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            idx,
            buffer.format_finite(*value)
        )?;
    }
    write!(writer, "</c:{}>", tag)?;
    Ok(())
}

fn write_axis_ids<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(writer, r#"<c:axId val="{}"/>"#, CATEGORY_AXIS_ID)?;
    write!(writer, r#"<c:axId val="{}"/>"#, VALUE_AXIS_ID)?;
    Ok(())
}

fn write_axes<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(writer, "<c:catAx>")?;
    write!(writer, r#"<c:axId val="{}"/>"#, CATEGORY_AXIS_ID)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="b"/>"#)?;
    write!(writer, r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#)?;
    write!(writer, r#"<c:majorTickMark val="none"/><c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    if let Some(color) = chart.text_color {
        write_text_props(writer, color, 1200)?;
    }
    write!(writer, r#"<c:crossAx val="{}"/>"#, VALUE_AXIS_ID)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;
    write!(writer, r#"<c:auto val="1"/>"#)?;
    write!(writer, r#"<c:lblAlgn val="ctr"/>"#)?;
    write!(writer, r#"<c:lblOffset val="100"/>"#)?;
    write!(writer, r#"<c:noMultiLvlLbl val="0"/>"#)?;
    write!(writer, "</c:catAx>")?;

    write!(writer, "<c:valAx>")?;
    write!(writer, r#"<c:axId val="{}"/>"#, VALUE_AXIS_ID)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="l"/>"#)?;
    write!(
        writer,
        r#"<c:majorGridlines><c:spPr><a:ln w="6350"><a:solidFill><a:srgbClr val="64748B"><a:alpha val="40000"/></a:srgbClr></a:solidFill></a:ln></c:spPr></c:majorGridlines>"#
    )?;
    write!(writer, r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#)?;
    write!(writer, r#"<c:majorTickMark val="none"/><c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    if let Some(color) = chart.text_color {
        write_text_props(writer, color, 1200)?;
    }
    write!(writer, r#"<c:crossAx val="{}"/>"#, CATEGORY_AXIS_ID)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;
    write!(writer, r#"<c:crossBetween val="between"/>"#)?;
    write!(writer, "</c:valAx>")?;
    Ok(())
}

fn write_solid_fill<W: Write>(writer: &mut W, color: RGBColor) -> std::io::Result<()> {
    write!(
        writer,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        color.to_hex()
    )
}

fn write_text_props<W: Write>(writer: &mut W, color: RGBColor, size: u32) -> std::io::Result<()> {
    write!(writer, "<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr>")?;
    write!(writer, r#"<a:defRPr sz="{}">"#, size)?;
    write_solid_fill(writer, color)?;
    write!(writer, "</a:defRPr></a:pPr>")?;
    write!(writer, r#"<a:endParaRPr lang="en-US"/></a:p></c:txPr>"#)?;
    Ok(())
}
