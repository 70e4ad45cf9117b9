//! Reading the sample documents under `data/examples`.

use std::path::PathBuf;

use sedml::kisao;
use sedml::math::{Math, Operator, formula_to_string};
use sedml::model::{
    AbstractTask, ChangeKind, CurveType, MappingType, Output, Range, ScaleType, SimulationKind,
};
use sedml::{SedDocument, read_sedml};

fn sample(name: &str) -> SedDocument {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data/examples")
        .join(name);
    let doc = read_sedml(&path);
    assert!(
        doc.error_log().is_empty(),
        "{} has diagnostics:\n{}",
        name,
        doc.error_log()
    );
    doc
}

#[test]
fn test_oscillator_level1_version1() {
    let doc = sample("oscillator_l1v1.sedml");
    assert_eq!((doc.level(), doc.version()), (1, 1));
    assert!(doc.base.notes.as_deref().unwrap().contains("simple oscillator"));
    assert_eq!(doc.namespaces[0].0, "sbml");

    let simulation = doc.simulation("sim1").unwrap();
    assert_eq!(simulation.kisao_id(), Some("KISAO:0000019"));
    match &simulation.kind {
        SimulationKind::UniformTimeCourse {
            output_end_time,
            number_of_steps,
            ..
        } => {
            assert_eq!(*output_end_time, 200.0);
            assert_eq!(*number_of_steps, 1000);
        }
        other => panic!("Expected a uniform time course, got {:?}", other),
    }

    let model = doc.model("model1").unwrap();
    assert_eq!(model.source, "urn:miriam:biomodels.db:BIOMD0000000021");
    assert!(matches!(
        &model.changes[0].kind,
        ChangeKind::ChangeAttribute { new_value } if new_value == "0.28"
    ));

    let total = doc.data_generator("P_tot").unwrap();
    assert_eq!(total.variables.len(), 2);
    assert_eq!(total.parameters[0].value, 0.5);
    assert_eq!(
        formula_to_string(total.math.as_ref().unwrap()),
        "scale * (P0 + P1)"
    );

    let time = doc.data_generator("time").unwrap();
    assert_eq!(
        time.variables[0].symbol.as_deref(),
        Some("urn:sedml:symbol:time")
    );
    assert_eq!(doc.outputs.len(), 2);
}

#[test]
fn test_parameter_scan_level1_version3() {
    let doc = sample("parameter_scan_l1v3.sedml");
    assert_eq!(doc.version(), 3);
    assert_eq!(doc.data_descriptions[0].data_sources[0].index_set.as_deref(), Some("time"));

    let steady = doc.simulation("steady").unwrap();
    assert!(matches!(steady.kind, SimulationKind::SteadyState));
    let timecourse = doc.simulation("timecourse").unwrap();
    let algorithm = timecourse.algorithm.as_ref().unwrap();
    assert_eq!(algorithm.parameters[0].kisao_id, "KISAO:0000211");
    assert_eq!(algorithm.parameters[0].value, "1e-8");
    assert_eq!(kisao::name(&algorithm.kisao_id), Some("CVODE"));

    let model = doc.model("model1").unwrap();
    match &model.changes[0].kind {
        ChangeKind::ComputeChange {
            variables,
            parameters,
            math,
            ..
        } => {
            assert_eq!(variables[0].model_reference.as_deref(), Some("model1"));
            assert_eq!(parameters[0].value, 2.0);
            assert_eq!(
                math.as_ref(),
                Some(&Math::binary(
                    Operator::Divide,
                    Math::ident("alpha"),
                    Math::ident("ratio")
                ))
            );
        }
        other => panic!("Expected a computeChange, got {:?}", other),
    }
    assert!(matches!(model.changes[1].kind, ChangeKind::RemoveXml));

    let Some(AbstractTask::RepeatedTask(scan)) = doc.task("scan") else {
        panic!("Expected a repeated task");
    };
    assert_eq!(scan.range.as_deref(), Some("alpha_values"));
    assert!(scan.reset_model);
    assert_eq!(scan.ranges.len(), 3);
    assert_eq!(scan.range_by_id("alpha_values").unwrap().value_count(), Some(10));
    match scan.range_by_id("hill") {
        Some(Range::Vector(range)) => assert_eq!(range.values, vec![1.0, 2.0, 4.0]),
        other => panic!("Expected a vector range, got {:?}", other),
    }
    assert!(matches!(
        scan.range_by_id("beta_values"),
        Some(Range::Functional(range)) if range.range.as_deref() == Some("alpha_values")
    ));
    assert_eq!(scan.changes.len(), 2);
    let orders: Vec<_> = scan.sub_tasks.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![Some(1), Some(2)]);

    let log_u = doc.data_generator("u_dg").unwrap();
    assert_eq!(formula_to_string(log_u.math.as_ref().unwrap()), "log10(u)");

    let Some(Output::Plot3D(plot)) = doc.output("surface_plot") else {
        panic!("Expected a 3D plot");
    };
    assert_eq!(plot.surfaces[0].log_z, Some(true));
}

#[test]
fn test_fitting_level1_version4() {
    let doc = sample("fitting_l1v4.sedml");
    assert_eq!(doc.version(), 4);

    let Some(AbstractTask::ParameterEstimationTask(fit)) = doc.task("fit") else {
        panic!("Expected a parameter estimation task");
    };
    assert!(fit.objective.is_some());
    let parameter = &fit.adjustable_parameters[0];
    assert_eq!(parameter.initial_value, Some(0.5));
    let bounds = parameter.bounds.as_ref().unwrap();
    assert_eq!(bounds.scale, ScaleType::Log);
    assert_eq!((bounds.lower_bound, bounds.upper_bound), (0.001, 10.0));
    let mappings = &fit.fit_experiments[0].fit_mappings;
    assert_eq!(mappings[0].kind, MappingType::Time);
    assert_eq!(mappings[1].kind, MappingType::Observable);
    assert_eq!(mappings[1].weight, Some(1.0));

    let Some(Output::Plot2D(plot)) = doc.output("plot1") else {
        panic!("Expected a 2D plot");
    };
    assert_eq!(plot.plot.legend, Some(true));
    assert_eq!(plot.plot.x_axis.as_ref().unwrap().max, Some(10.0));
    assert_eq!(
        plot.plot.y_axis.as_ref().unwrap().style.as_deref(),
        Some("axis_style")
    );
    assert_eq!(plot.curves[0].style(), Some("red_points"));
    let sedml::model::Curve2D::Curve(curve) = &plot.curves[0] else {
        panic!("Expected a curve");
    };
    assert_eq!(curve.kind, Some(CurveType::Points));

    let Some(Output::Figure(figure)) = doc.output("fig1") else {
        panic!("Expected a figure");
    };
    assert_eq!(figure.sub_plots.len(), 2);

    let points = doc.style("red_points").unwrap();
    assert_eq!(points.base_style.as_deref(), Some("axis_style"));
    assert_eq!(points.marker.as_ref().unwrap().size, Some(4.0));
}

#[test]
fn test_samples_are_consistent() {
    for name in [
        "oscillator_l1v1.sedml",
        "parameter_scan_l1v3.sedml",
        "fitting_l1v4.sedml",
    ] {
        let mut doc = sample(name);
        let found = doc.check_consistency();
        assert_eq!(found, 0, "{}:\n{}", name, doc.error_log());
    }
}
