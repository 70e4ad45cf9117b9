//! Readers for outputs: reports, plots, figures and the parameter
//! estimation outputs.

use crate::model::{
    Axis, Curve, Curve2D, DataSet, Figure, Output, ParameterEstimationReport,
    ParameterEstimationResultPlot, Plot2D, Plot3D, PlotSettings, Report, ShadedArea, SubPlot,
    Surface, WaterfallPlot,
};
use crate::types::TypeCode;
use crate::xml::deserialize::DeserializeError;
use crate::xml::deserialize::helpers::{AttrReader, read_children, read_items, read_list};
use crate::xml::quick::de::{ChildElement, XmlCursor};

/// Read an item of `listOfOutputs`. Returns `None` for unknown element names.
pub fn read_output<'a>(
    cursor: &mut XmlCursor<'a>,
    name: &str,
    element: ChildElement<'a>,
) -> Result<Option<Output>, DeserializeError> {
    let output = match name {
        "report" => Output::Report(read_report(cursor, element)?),
        "plot2D" => Output::Plot2D(read_plot2d(cursor, element)?),
        "plot3D" => Output::Plot3D(read_plot3d(cursor, element)?),
        "figure" => Output::Figure(read_figure(cursor, element)?),
        "parameterEstimationResultPlot" => {
            let code = TypeCode::ParameterEstimationResultPlot;
            let mut attrs = AttrReader::new(cursor, &element.start, code)?;
            let mut plot = ParameterEstimationResultPlot {
                base: attrs.base(),
                plot: plot_settings(&mut attrs),
                task_reference: attrs.required("taskReference"),
            };
            attrs.finish(cursor);
            read_children(cursor, &element, code, &mut plot.base, |cursor, name, child| {
                read_axis_child(cursor, name, child, &mut plot.plot)
            })?;
            Output::ParameterEstimationResultPlot(plot)
        }
        "waterfallPlot" => {
            let code = TypeCode::WaterfallPlot;
            let mut attrs = AttrReader::new(cursor, &element.start, code)?;
            let mut plot = WaterfallPlot {
                base: attrs.base(),
                plot: plot_settings(&mut attrs),
                task_reference: attrs.required("taskRef"),
            };
            attrs.finish(cursor);
            read_children(cursor, &element, code, &mut plot.base, |cursor, name, child| {
                read_axis_child(cursor, name, child, &mut plot.plot)
            })?;
            Output::WaterfallPlot(plot)
        }
        "parameterEstimationReport" => {
            let code = TypeCode::ParameterEstimationReport;
            let mut attrs = AttrReader::new(cursor, &element.start, code)?;
            let mut report = ParameterEstimationReport {
                base: attrs.base(),
                task_reference: attrs.required("taskReference"),
            };
            attrs.finish(cursor);
            read_children(cursor, &element, code, &mut report.base, |_, _, _| Ok(false))?;
            Output::ParameterEstimationReport(report)
        }
        _ => return Ok(None),
    };
    Ok(Some(output))
}

fn plot_settings(attrs: &mut AttrReader) -> PlotSettings {
    PlotSettings {
        legend: attrs.opt_bool("legend"),
        height: attrs.opt_f64("height"),
        width: attrs.opt_f64("width"),
        x_axis: None,
        y_axis: None,
    }
}

/// The `xAxis` and `yAxis` children every plot may have.
fn read_axis_child<'a>(
    cursor: &mut XmlCursor<'a>,
    name: &str,
    child: ChildElement<'a>,
    plot: &mut PlotSettings,
) -> Result<bool, DeserializeError> {
    match name {
        "xAxis" => plot.x_axis = Some(read_axis(cursor, child)?),
        "yAxis" => plot.y_axis = Some(read_axis(cursor, child)?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_report<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Report, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Report)?;
    let mut report = Report {
        base: attrs.base(),
        data_sets: Vec::new(),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::Report,
        &mut report.base,
        |cursor, name, child| match name {
            "listOfDataSets" => {
                read_items(cursor, &child, "dataSet", &mut report.data_sets, read_data_set)?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(report)
}

fn read_data_set<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<DataSet, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::DataSet)?;
    let mut data_set = DataSet {
        base: attrs.base(),
        label: attrs.required("label"),
        data_reference: attrs.required("dataReference"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::DataSet, &mut data_set.base, |_, _, _| Ok(false))?;
    Ok(data_set)
}

fn read_plot2d<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Plot2D, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Plot2D)?;
    let mut plot = Plot2D {
        base: attrs.base(),
        plot: plot_settings(&mut attrs),
        curves: Vec::new(),
        right_y_axis: None,
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Plot2D,
        &mut plot.base,
        |cursor, name, child| match name {
            "listOfCurves" => {
                read_list(cursor, &child, |cursor, name, item| {
                    let curve = match name {
                        "curve" => Curve2D::Curve(read_curve(cursor, item)?),
                        "shadedArea" => Curve2D::ShadedArea(read_shaded_area(cursor, item)?),
                        _ => return Ok(false),
                    };
                    plot.curves.push(curve);
                    Ok(true)
                })?;
                Ok(true)
            }
            "rightYAxis" => {
                plot.right_y_axis = Some(read_axis(cursor, child)?);
                Ok(true)
            }
            _ => read_axis_child(cursor, name, child, &mut plot.plot),
        },
    )?;
    Ok(plot)
}

fn read_curve<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Curve, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Curve)?;
    let mut curve = Curve {
        base: attrs.base(),
        log_x: attrs.opt_bool("logX"),
        log_y: attrs.opt_bool("logY"),
        x_data_reference: attrs.opt("xDataReference"),
        y_data_reference: attrs.opt("yDataReference"),
        order: attrs.opt_i32("order"),
        style: attrs.opt("style"),
        y_axis: attrs.opt("yAxis"),
        kind: attrs.opt_enum("type"),
        x_error_upper: attrs.opt("xErrorUpper"),
        x_error_lower: attrs.opt("xErrorLower"),
        y_error_upper: attrs.opt("yErrorUpper"),
        y_error_lower: attrs.opt("yErrorLower"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Curve, &mut curve.base, |_, _, _| Ok(false))?;
    Ok(curve)
}

fn read_shaded_area<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<ShadedArea, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::ShadedArea)?;
    // logX belongs to every curve kind but has no effect on shaded areas
    let _ = attrs.opt_bool("logX");
    let mut area = ShadedArea {
        base: attrs.base(),
        x_data_reference: attrs.opt("xDataReference"),
        order: attrs.opt_i32("order"),
        style: attrs.opt("style"),
        y_axis: attrs.opt("yAxis"),
        y_data_reference_from: attrs.required("yDataReferenceFrom"),
        y_data_reference_to: attrs.required("yDataReferenceTo"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::ShadedArea, &mut area.base, |_, _, _| Ok(false))?;
    Ok(area)
}

fn read_plot3d<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Plot3D, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Plot3D)?;
    let mut plot = Plot3D {
        base: attrs.base(),
        plot: plot_settings(&mut attrs),
        surfaces: Vec::new(),
        z_axis: None,
    };
    attrs.finish(cursor);

    read_children(
        cursor,
        &element,
        TypeCode::Plot3D,
        &mut plot.base,
        |cursor, name, child| match name {
            "listOfSurfaces" => {
                read_items(cursor, &child, "surface", &mut plot.surfaces, read_surface)?;
                Ok(true)
            }
            "zAxis" => {
                plot.z_axis = Some(read_axis(cursor, child)?);
                Ok(true)
            }
            _ => read_axis_child(cursor, name, child, &mut plot.plot),
        },
    )?;
    Ok(plot)
}

fn read_surface<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Surface, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Surface)?;
    let mut surface = Surface {
        base: attrs.base(),
        log_x: attrs.opt_bool("logX"),
        log_y: attrs.opt_bool("logY"),
        log_z: attrs.opt_bool("logZ"),
        x_data_reference: attrs.opt("xDataReference"),
        y_data_reference: attrs.opt("yDataReference"),
        z_data_reference: attrs.opt("zDataReference"),
        order: attrs.opt_i32("order"),
        style: attrs.opt("style"),
        kind: attrs.opt_enum("type"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Surface, &mut surface.base, |_, _, _| Ok(false))?;
    Ok(surface)
}

fn read_axis<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Axis, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Axis)?;
    let mut axis = Axis {
        base: attrs.base(),
        kind: attrs.opt_enum("type"),
        min: attrs.opt_f64("min"),
        max: attrs.opt_f64("max"),
        grid: attrs.opt_bool("grid"),
        reverse: attrs.opt_bool("reverse"),
        style: attrs.opt("style"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::Axis, &mut axis.base, |_, _, _| Ok(false))?;
    Ok(axis)
}

fn read_figure<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<Figure, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::Figure)?;
    let mut figure = Figure {
        base: attrs.base(),
        num_rows: attrs.opt_i32("numRows"),
        num_cols: attrs.opt_i32("numCols"),
        sub_plots: Vec::new(),
    };
    attrs.finish(cursor);
    read_children(
        cursor,
        &element,
        TypeCode::Figure,
        &mut figure.base,
        |cursor, name, child| match name {
            "listOfSubPlots" => {
                read_items(cursor, &child, "subPlot", &mut figure.sub_plots, read_sub_plot)?;
                Ok(true)
            }
            _ => Ok(false),
        },
    )?;
    Ok(figure)
}

fn read_sub_plot<'a>(
    cursor: &mut XmlCursor<'a>,
    element: ChildElement<'a>,
) -> Result<SubPlot, DeserializeError> {
    let mut attrs = AttrReader::new(cursor, &element.start, TypeCode::SubPlot)?;
    let mut sub_plot = SubPlot {
        base: attrs.base(),
        plot: attrs.required("plot"),
        row: attrs.opt_i32("row"),
        col: attrs.opt_i32("col"),
        row_span: attrs.opt_i32("rowSpan"),
        col_span: attrs.opt_i32("colSpan"),
    };
    attrs.finish(cursor);
    read_children(cursor, &element, TypeCode::SubPlot, &mut sub_plot.base, |_, _, _| Ok(false))?;
    Ok(sub_plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorCode;
    use crate::model::{AxisType, CurveType};
    use quick_xml::events::Event;

    fn read(xml: &str) -> (Output, crate::diagnostics::ErrorLog) {
        let mut cursor = XmlCursor::new(xml);
        let element = match cursor.next_event().unwrap() {
            Event::Start(start) => ChildElement {
                start,
                is_empty: false,
            },
            Event::Empty(start) => ChildElement {
                start,
                is_empty: true,
            },
            e => panic!("Expected an element, got {:?}", e),
        };
        let name = element.name();
        let output = read_output(&mut cursor, &name, element).unwrap().unwrap();
        (output, cursor.into_log())
    }

    #[test]
    fn test_plot2d_with_axes_and_curves() {
        let (output, log) = read(
            r#"<plot2D id="p1" legend="true" height="300">
                 <xAxis type="log10" min="0.1" grid="true"/>
                 <listOfCurves>
                   <curve id="c1" logX="false" logY="false" xDataReference="time" yDataReference="S1" type="points"/>
                   <shadedArea id="a1" xDataReference="time" yDataReferenceFrom="lo" yDataReferenceTo="hi"/>
                 </listOfCurves>
               </plot2D>"#,
        );
        assert!(log.is_empty(), "{}", log);
        let Output::Plot2D(plot) = output else {
            panic!("Expected a 2D plot");
        };
        assert_eq!(plot.plot.legend, Some(true));
        assert_eq!(plot.plot.height, Some(300.0));
        assert_eq!(plot.plot.x_axis.as_ref().unwrap().kind, Some(AxisType::Log10));
        assert_eq!(plot.curves.len(), 2);
        match &plot.curves[0] {
            Curve2D::Curve(curve) => assert_eq!(curve.kind, Some(CurveType::Points)),
            other => panic!("Expected a curve, got {:?}", other),
        }
    }

    #[test]
    fn test_report_data_sets() {
        let (output, log) = read(
            r#"<report id="r1"><listOfDataSets><dataSet id="d1" label="time" dataReference="dg_time"/></listOfDataSets></report>"#,
        );
        assert!(log.is_empty());
        let Output::Report(report) = output else {
            panic!("Expected a report");
        };
        assert_eq!(report.data_sets[0].data_reference, "dg_time");
    }

    #[test]
    fn test_bad_enum_value() {
        let (_, log) = read(r#"<plot3D id="p"><listOfSurfaces><surface id="s" type="hologram"/></listOfSurfaces></plot3D>"#);
        assert!(log.contains(ErrorCode::XML_ATTRIBUTE_TYPE_MISMATCH));
    }

    #[test]
    fn test_waterfall_uses_task_ref() {
        let (output, log) = read(r#"<waterfallPlot id="w" taskRef="pe1"/>"#);
        assert!(log.is_empty());
        let Output::WaterfallPlot(plot) = output else {
            panic!("Expected a waterfall plot");
        };
        assert_eq!(plot.task_reference, "pe1");
    }
}
