//! Consistency checks on a whole document.
//!
//! These are the rules the reader cannot check while streaming: identifier
//! syntax and uniqueness, and references between elements.

use std::collections::{HashMap, HashSet};

use crate::core::is_valid_sid;
use crate::diagnostics::{Diagnostic, ErrorCode, Severity};
use crate::model::{
    AbstractTask, Curve2D, DataGenerator, Output, Parameter, ParameterEstimationTask, Range,
    RepeatedTask, SedDocument, SetValue, SimulationKind, Variable,
};
use crate::types::SedElement;

/// What an id reference has to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Model,
    Simulation,
    Task,
    DataGenerator,
    Style,
    Plot,
    DataSource,
}

impl RefKind {
    fn noun(self) -> &'static str {
        match self {
            RefKind::Model => "model",
            RefKind::Simulation => "simulation",
            RefKind::Task => "task",
            RefKind::DataGenerator => "data generator",
            RefKind::Style => "style",
            RefKind::Plot => "plot",
            RefKind::DataSource => "data source",
        }
    }
}

/// Ids of the elements that can be referenced from anywhere in the document.
#[derive(Debug, Default)]
struct Index<'a> {
    models: HashSet<&'a str>,
    simulations: HashSet<&'a str>,
    tasks: HashSet<&'a str>,
    data_generators: HashSet<&'a str>,
    styles: HashSet<&'a str>,
    plots: HashSet<&'a str>,
    data_sources: HashSet<&'a str>,
}

impl<'a> Index<'a> {
    fn build(doc: &'a SedDocument) -> Self {
        fn ids<'a, T: SedElement>(items: &'a [T]) -> HashSet<&'a str> {
            items.iter().filter_map(|item| item.id()).collect()
        }

        Index {
            models: ids(&doc.models),
            simulations: ids(&doc.simulations),
            tasks: ids(&doc.tasks),
            data_generators: ids(&doc.data_generators),
            styles: ids(&doc.styles),
            plots: doc
                .outputs
                .iter()
                .filter(|o| o.plot_settings().is_some())
                .filter_map(|o| o.id())
                .collect(),
            data_sources: doc
                .data_descriptions
                .iter()
                .flat_map(|d| ids(&d.data_sources))
                .collect(),
        }
    }

    fn contains(&self, kind: RefKind, id: &str) -> bool {
        let set = match kind {
            RefKind::Model => &self.models,
            RefKind::Simulation => &self.simulations,
            RefKind::Task => &self.tasks,
            RefKind::DataGenerator => &self.data_generators,
            RefKind::Style => &self.styles,
            RefKind::Plot => &self.plots,
            RefKind::DataSource => &self.data_sources,
        };
        set.contains(id)
    }
}

struct Checker<'a> {
    index: Index<'a>,
    found: Vec<Diagnostic>,
}

fn describe(element: &dyn SedElement) -> String {
    match element.id() {
        Some(id) => format!("<{}> '{}'", element.element_name(), id),
        None => format!("<{}>", element.element_name()),
    }
}

impl<'a> Checker<'a> {
    fn fail(&mut self, code: ErrorCode, severity: Severity, message: String) {
        self.found.push(Diagnostic::new(code, severity, 0, 0, message));
    }

    fn unresolved(&mut self, code: ErrorCode, owner: &dyn SedElement, attribute: &str, reference: &str, noun: &str) {
        self.fail(
            code,
            Severity::Error,
            format!(
                "The '{}' attribute of {} is '{}', which is not the id of any {}.",
                attribute,
                describe(owner),
                reference,
                noun
            ),
        );
    }

    fn check_ref(
        &mut self,
        code: ErrorCode,
        kind: RefKind,
        owner: &dyn SedElement,
        attribute: &str,
        reference: &str,
    ) {
        if !self.index.contains(kind, reference) {
            self.unresolved(code, owner, attribute, reference, kind.noun());
        }
    }

    fn check_opt_ref(
        &mut self,
        code: ErrorCode,
        kind: RefKind,
        owner: &dyn SedElement,
        attribute: &str,
        reference: Option<&str>,
    ) {
        if let Some(reference) = reference {
            self.check_ref(code, kind, owner, attribute, reference);
        }
    }

    fn check_ids(&mut self, doc: &'a SedDocument) {
        let mut seen: HashMap<&str, &'static str> = HashMap::new();
        let mut global = Vec::new();
        collect_global_ids(doc, &mut global);
        for (id, element) in global {
            self.check_syntax(id, element);
            if let Some(first) = seen.insert(id, element) {
                self.fail(
                    ErrorCode::DUPLICATE_COMPONENT_ID,
                    Severity::Error,
                    format!(
                        "The id '{}' of a <{}> is already used by a <{}>.",
                        id, element, first
                    ),
                );
            }
        }
    }

    fn check_syntax(&mut self, id: &str, element: &str) {
        if !is_valid_sid(id) {
            self.fail(
                ErrorCode::ID_SYNTAX_RULE,
                Severity::Error,
                format!("The id '{}' of a <{}> is not a valid SId.", id, element),
            );
        }
    }

    /// Variables and parameters are scoped to the element holding the math.
    fn check_computation(&mut self, variables: &[Variable], parameters: &[Parameter]) {
        let mut local: HashSet<&str> = HashSet::new();
        let ids = variables
            .iter()
            .map(|v| (v.id(), "variable"))
            .chain(parameters.iter().map(|p| (p.id(), "parameter")));
        for (id, element) in ids {
            let Some(id) = id else { continue };
            self.check_syntax(id, element);
            if !local.insert(id) {
                self.fail(
                    ErrorCode::DUPLICATE_COMPONENT_ID,
                    Severity::Error,
                    format!("The id '{}' is used by more than one variable or parameter in the same scope.", id),
                );
            }
        }
        for variable in variables {
            self.check_variable(variable);
        }
    }

    fn check_variable(&mut self, variable: &Variable) {
        if variable.target.is_none() && variable.symbol.is_none() {
            self.fail(
                ErrorCode::VARIABLE_TARGET_OR_SYMBOL,
                Severity::Error,
                format!("{} has neither a 'target' nor a 'symbol'.", describe(variable)),
            );
        }
        self.check_opt_ref(
            ErrorCode::VARIABLE_TASK_REF,
            RefKind::Task,
            variable,
            "taskReference",
            variable.task_reference.as_deref(),
        );
        self.check_opt_ref(
            ErrorCode::VARIABLE_MODEL_REF,
            RefKind::Model,
            variable,
            "modelReference",
            variable.model_reference.as_deref(),
        );
    }

    fn check_models(&mut self, doc: &SedDocument) {
        for model in &doc.models {
            for change in &model.changes {
                if let crate::model::ChangeKind::ComputeChange {
                    variables,
                    parameters,
                    ..
                } = &change.kind
                {
                    self.check_computation(variables, parameters);
                }
            }
        }
    }

    fn check_simulations(&mut self, doc: &SedDocument) {
        for simulation in &doc.simulations {
            if let SimulationKind::UniformTimeCourse {
                initial_time,
                output_start_time,
                output_end_time,
                ..
            } = simulation.kind
            {
                if output_start_time < initial_time || output_end_time < output_start_time {
                    self.fail(
                        ErrorCode::TIME_COURSE_ORDER,
                        Severity::Warning,
                        format!(
                            "{} should satisfy initialTime <= outputStartTime <= outputEndTime, but has {} / {} / {}.",
                            describe(simulation),
                            initial_time,
                            output_start_time,
                            output_end_time
                        ),
                    );
                }
            }
        }
    }

    fn check_tasks(&mut self, doc: &SedDocument) {
        for task in &doc.tasks {
            match task {
                AbstractTask::Task(t) => {
                    self.check_ref(
                        ErrorCode::TASK_MODEL_REF,
                        RefKind::Model,
                        t,
                        "modelReference",
                        &t.model_reference,
                    );
                    self.check_ref(
                        ErrorCode::TASK_SIMULATION_REF,
                        RefKind::Simulation,
                        t,
                        "simulationReference",
                        &t.simulation_reference,
                    );
                }
                AbstractTask::RepeatedTask(t) => self.check_repeated_task(t),
                AbstractTask::ParameterEstimationTask(t) => self.check_estimation_task(t),
            }
        }
    }

    fn check_repeated_task(&mut self, task: &RepeatedTask) {
        let ranges: HashSet<&str> = task.ranges.iter().filter_map(|r| r.id()).collect();
        let local = |reference: &str| ranges.contains(reference);

        if let Some(range) = task.range.as_deref() {
            if !local(range) {
                self.unresolved(ErrorCode::REPEATED_TASK_RANGE_REF, task, "range", range, "range of this task");
            }
        }
        for range in &task.ranges {
            match range {
                Range::Functional(functional) => {
                    if let Some(reference) = functional.range.as_deref() {
                        if !local(reference) {
                            self.unresolved(
                                ErrorCode::FUNCTIONAL_RANGE_REF,
                                functional,
                                "range",
                                reference,
                                "range of this task",
                            );
                        }
                    }
                    self.check_computation(&functional.variables, &functional.parameters);
                }
                Range::Data(data) => self.check_ref(
                    ErrorCode::DATA_RANGE_SOURCE_REF,
                    RefKind::DataSource,
                    data,
                    "sourceReference",
                    &data.source_reference,
                ),
                Range::Uniform(_) | Range::Vector(_) => {}
            }
        }

        let set_values = task
            .changes
            .iter()
            .chain(task.sub_tasks.iter().flat_map(|s| s.changes.iter()));
        for set_value in set_values {
            self.check_set_value(set_value, &ranges);
        }
        for sub_task in &task.sub_tasks {
            self.check_ref(ErrorCode::SUB_TASK_TASK_REF, RefKind::Task, sub_task, "task", &sub_task.task);
        }
    }

    fn check_set_value(&mut self, set_value: &SetValue, ranges: &HashSet<&str>) {
        self.check_ref(
            ErrorCode::SET_VALUE_MODEL_REF,
            RefKind::Model,
            set_value,
            "modelReference",
            &set_value.model_reference,
        );
        if let Some(range) = set_value.range.as_deref() {
            if !ranges.contains(range) {
                self.unresolved(
                    ErrorCode::SET_VALUE_RANGE_REF,
                    set_value,
                    "range",
                    range,
                    "range of the enclosing task",
                );
            }
        }
        self.check_computation(&set_value.variables, &set_value.parameters);
    }

    fn check_estimation_task(&mut self, task: &ParameterEstimationTask) {
        let experiments: HashSet<&str> = task.fit_experiments.iter().filter_map(|e| e.id()).collect();
        for parameter in &task.adjustable_parameters {
            self.check_opt_ref(
                ErrorCode::ADJUSTABLE_PARAMETER_MODEL_REF,
                RefKind::Model,
                parameter,
                "modelReference",
                parameter.model_reference.as_deref(),
            );
            for reference in &parameter.experiment_references {
                if !experiments.contains(reference.experiment_id.as_str()) {
                    self.unresolved(
                        ErrorCode::EXPERIMENT_REFERENCE_REF,
                        reference,
                        "experimentId",
                        &reference.experiment_id,
                        "fit experiment of this task",
                    );
                }
            }
        }
        for mapping in task.fit_experiments.iter().flat_map(|e| e.fit_mappings.iter()) {
            let source = mapping.data_source.as_str();
            if !self.index.contains(RefKind::DataGenerator, source)
                && !self.index.contains(RefKind::DataSource, source)
            {
                self.unresolved(
                    ErrorCode::FIT_MAPPING_DATA_SOURCE_REF,
                    mapping,
                    "dataSource",
                    source,
                    "data generator or data source",
                );
            }
            self.check_ref(
                ErrorCode::FIT_MAPPING_TARGET_REF,
                RefKind::DataGenerator,
                mapping,
                "target",
                &mapping.target,
            );
        }
    }

    fn check_data_generators(&mut self, generators: &[DataGenerator]) {
        for generator in generators {
            self.check_computation(&generator.variables, &generator.parameters);
        }
    }

    fn check_outputs(&mut self, doc: &SedDocument) {
        for output in &doc.outputs {
            if let Some(plot) = output.plot_settings() {
                for axis in plot.x_axis.iter().chain(plot.y_axis.iter()) {
                    self.check_opt_ref(ErrorCode::AXIS_STYLE_REF, RefKind::Style, axis, "style", axis.style.as_deref());
                }
            }
            match output {
                Output::Report(report) => {
                    for data_set in &report.data_sets {
                        self.check_ref(
                            ErrorCode::DATA_SET_DATA_REF,
                            RefKind::DataGenerator,
                            data_set,
                            "dataReference",
                            &data_set.data_reference,
                        );
                    }
                }
                Output::Plot2D(plot) => {
                    if let Some(axis) = &plot.right_y_axis {
                        self.check_opt_ref(ErrorCode::AXIS_STYLE_REF, RefKind::Style, axis, "style", axis.style.as_deref());
                    }
                    for curve in &plot.curves {
                        self.check_curve(curve);
                    }
                }
                Output::Plot3D(plot) => {
                    if let Some(axis) = &plot.z_axis {
                        self.check_opt_ref(ErrorCode::AXIS_STYLE_REF, RefKind::Style, axis, "style", axis.style.as_deref());
                    }
                    for surface in &plot.surfaces {
                        let data = [
                            (ErrorCode::SURFACE_X_DATA_REF, "xDataReference", &surface.x_data_reference),
                            (ErrorCode::SURFACE_Y_DATA_REF, "yDataReference", &surface.y_data_reference),
                            (ErrorCode::SURFACE_Z_DATA_REF, "zDataReference", &surface.z_data_reference),
                        ];
                        for (code, attribute, reference) in data {
                            self.check_opt_ref(code, RefKind::DataGenerator, surface, attribute, reference.as_deref());
                        }
                        self.check_opt_ref(
                            ErrorCode::SURFACE_STYLE_REF,
                            RefKind::Style,
                            surface,
                            "style",
                            surface.style.as_deref(),
                        );
                    }
                }
                Output::Figure(figure) => {
                    for sub_plot in &figure.sub_plots {
                        self.check_ref(ErrorCode::SUB_PLOT_PLOT_REF, RefKind::Plot, sub_plot, "plot", &sub_plot.plot);
                    }
                }
                Output::ParameterEstimationResultPlot(plot) => self.check_ref(
                    ErrorCode::PE_RESULT_PLOT_TASK_REF,
                    RefKind::Task,
                    plot,
                    "taskReference",
                    &plot.task_reference,
                ),
                Output::WaterfallPlot(plot) => self.check_ref(
                    ErrorCode::WATERFALL_PLOT_TASK_REF,
                    RefKind::Task,
                    plot,
                    "taskRef",
                    &plot.task_reference,
                ),
                Output::ParameterEstimationReport(report) => self.check_ref(
                    ErrorCode::PE_REPORT_TASK_REF,
                    RefKind::Task,
                    report,
                    "taskReference",
                    &report.task_reference,
                ),
            }
        }
    }

    fn check_curve(&mut self, curve: &Curve2D) {
        match curve {
            Curve2D::Curve(c) => {
                let data = [
                    (ErrorCode::CURVE_X_DATA_REF, "xDataReference", &c.x_data_reference),
                    (ErrorCode::CURVE_Y_DATA_REF, "yDataReference", &c.y_data_reference),
                    (ErrorCode::CURVE_X_ERROR_UPPER_REF, "xErrorUpper", &c.x_error_upper),
                    (ErrorCode::CURVE_X_ERROR_LOWER_REF, "xErrorLower", &c.x_error_lower),
                    (ErrorCode::CURVE_Y_ERROR_UPPER_REF, "yErrorUpper", &c.y_error_upper),
                    (ErrorCode::CURVE_Y_ERROR_LOWER_REF, "yErrorLower", &c.y_error_lower),
                ];
                for (code, attribute, reference) in data {
                    self.check_opt_ref(code, RefKind::DataGenerator, curve, attribute, reference.as_deref());
                }
            }
            Curve2D::ShadedArea(area) => {
                self.check_opt_ref(
                    ErrorCode::CURVE_X_DATA_REF,
                    RefKind::DataGenerator,
                    curve,
                    "xDataReference",
                    area.x_data_reference.as_deref(),
                );
                self.check_ref(
                    ErrorCode::SHADED_AREA_Y_DATA_FROM_REF,
                    RefKind::DataGenerator,
                    curve,
                    "yDataReferenceFrom",
                    &area.y_data_reference_from,
                );
                self.check_ref(
                    ErrorCode::SHADED_AREA_Y_DATA_TO_REF,
                    RefKind::DataGenerator,
                    curve,
                    "yDataReferenceTo",
                    &area.y_data_reference_to,
                );
            }
        }
        self.check_opt_ref(ErrorCode::CURVE_STYLE_REF, RefKind::Style, curve, "style", curve.style());
    }

    fn check_styles(&mut self, doc: &SedDocument) {
        for style in &doc.styles {
            self.check_opt_ref(
                ErrorCode::STYLE_BASE_STYLE_REF,
                RefKind::Style,
                style,
                "baseStyle",
                style.base_style.as_deref(),
            );
        }
    }
}

/// Ids that share the document-wide namespace, with the element carrying them.
fn collect_global_ids<'a>(doc: &'a SedDocument, out: &mut Vec<(&'a str, &'static str)>) {
    fn push<'a>(out: &mut Vec<(&'a str, &'static str)>, element: &'a dyn SedElement) {
        if let Some(id) = element.id() {
            out.push((id, element.element_name()));
        }
    }

    push(out, doc);
    for description in &doc.data_descriptions {
        push(out, description);
        for source in &description.data_sources {
            push(out, source);
            source.slices.iter().for_each(|s| push(out, s));
        }
    }
    for model in &doc.models {
        push(out, model);
        model.changes.iter().for_each(|c| push(out, c));
    }
    doc.simulations.iter().for_each(|s| push(out, s));
    for task in &doc.tasks {
        push(out, task);
        match task {
            AbstractTask::Task(_) => {}
            AbstractTask::RepeatedTask(t) => {
                t.ranges.iter().for_each(|r| push(out, r));
                t.changes.iter().for_each(|c| push(out, c));
                t.sub_tasks.iter().for_each(|s| push(out, s));
            }
            AbstractTask::ParameterEstimationTask(t) => {
                t.adjustable_parameters.iter().for_each(|p| push(out, p));
                for experiment in &t.fit_experiments {
                    push(out, experiment);
                    experiment.fit_mappings.iter().for_each(|m| push(out, m));
                }
            }
        }
    }
    doc.data_generators.iter().for_each(|g| push(out, g));
    for output in &doc.outputs {
        push(out, output);
        match output {
            Output::Report(r) => r.data_sets.iter().for_each(|d| push(out, d)),
            Output::Plot2D(p) => p.curves.iter().for_each(|c| push(out, c)),
            Output::Plot3D(p) => p.surfaces.iter().for_each(|s| push(out, s)),
            Output::Figure(f) => f.sub_plots.iter().for_each(|s| push(out, s)),
            _ => {}
        }
    }
    doc.styles.iter().for_each(|s| push(out, s));
}

impl SedDocument {
    /// Checks identifiers and cross references, adding every failure to the
    /// error log. Returns the number of failures found by this call.
    pub fn check_consistency(&mut self) -> usize {
        let found = {
            let doc: &SedDocument = self;
            let mut checker = Checker {
                index: Index::build(doc),
                found: Vec::new(),
            };
            checker.check_ids(doc);
            checker.check_models(doc);
            checker.check_simulations(doc);
            checker.check_tasks(doc);
            checker.check_data_generators(&doc.data_generators);
            checker.check_outputs(doc);
            checker.check_styles(doc);
            checker.found
        };
        let count = found.len();
        log::debug!("consistency check found {} problem(s)", count);
        self.error_log_mut().extend(found);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SedBase;
    use crate::model::{
        Curve, DataSet, Model, Plot2D, Report, Simulation, SubTask, Task, UniformRange,
    };

    fn valid_document() -> SedDocument {
        let mut doc = SedDocument::new();
        doc.models
            .push(Model::new("model1", "urn:sedml:language:sbml", "model.xml"));
        doc.simulations
            .push(Simulation::uniform_time_course("sim1", 0.0, 0.0, 10.0, 100));
        doc.tasks
            .push(AbstractTask::Task(Task::new("task1", "model1", "sim1")));
        doc.data_generators.push(DataGenerator::for_variable(
            "dg_time",
            Variable::with_symbol("time", "urn:sedml:symbol:time").task_reference("task1"),
        ));
        doc.outputs.push(Output::Report(Report {
            base: SedBase::with_id("report1"),
            data_sets: vec![DataSet::new("ds1", "time", "dg_time")],
        }));
        doc
    }

    #[test]
    fn test_valid_document_passes() {
        let mut doc = valid_document();
        assert_eq!(doc.check_consistency(), 0);
        assert!(doc.error_log().is_empty());
    }

    #[test]
    fn test_unresolved_task_references() {
        let mut doc = valid_document();
        doc.tasks
            .push(AbstractTask::Task(Task::new("task2", "missing", "sim1")));
        assert_eq!(doc.check_consistency(), 1);
        let diagnostic = doc.error_log().get(0).unwrap();
        assert_eq!(diagnostic.code, ErrorCode::TASK_MODEL_REF);
        assert!(diagnostic.message.contains("'missing'"));
    }

    #[test]
    fn test_duplicate_and_malformed_ids() {
        let mut doc = valid_document();
        doc.simulations
            .push(Simulation::uniform_time_course("model1", 0.0, 0.0, 1.0, 10));
        doc.models.push(Model::new("2nd", "urn:sedml:language:sbml", "b.xml"));
        doc.check_consistency();
        assert!(doc.error_log().contains(ErrorCode::DUPLICATE_COMPONENT_ID));
        assert!(doc.error_log().contains(ErrorCode::ID_SYNTAX_RULE));
    }

    #[test]
    fn test_variable_needs_target_or_symbol() {
        let mut doc = valid_document();
        doc.data_generators[0].variables[0].symbol = None;
        doc.check_consistency();
        assert!(doc.error_log().contains(ErrorCode::VARIABLE_TARGET_OR_SYMBOL));
    }

    #[test]
    fn test_time_course_order_is_a_warning() {
        let mut doc = valid_document();
        doc.simulations
            .push(Simulation::uniform_time_course("sim2", 5.0, 0.0, 10.0, 10));
        assert_eq!(doc.check_consistency(), 1);
        assert!(doc.error_log().contains(ErrorCode::TIME_COURSE_ORDER));
        assert!(!doc.has_errors());
    }

    #[test]
    fn test_repeated_task_references() {
        let mut doc = valid_document();
        let task = RepeatedTask {
            base: SedBase::with_id("repeat"),
            range: Some("nope".to_string()),
            ranges: vec![Range::Uniform(UniformRange {
                base: SedBase::with_id("r1"),
                start: 0.0,
                end: 1.0,
                number_of_steps: 10,
                kind: "linear".to_string(),
            })],
            changes: vec![SetValue {
                model_reference: "model1".to_string(),
                range: Some("r1".to_string()),
                target: Some("/sbml:sbml".to_string()),
                ..SetValue::default()
            }],
            sub_tasks: vec![SubTask {
                task: "ghost".to_string(),
                ..SubTask::default()
            }],
            ..RepeatedTask::default()
        };
        doc.tasks.push(AbstractTask::RepeatedTask(task));
        assert_eq!(doc.check_consistency(), 2);
        assert!(doc.error_log().contains(ErrorCode::REPEATED_TASK_RANGE_REF));
        assert!(doc.error_log().contains(ErrorCode::SUB_TASK_TASK_REF));
    }

    #[test]
    fn test_curve_and_style_references() {
        let mut doc = valid_document();
        let mut curve = Curve::new("c1", "dg_time", "dg_missing");
        curve.style = Some("no_style".to_string());
        doc.outputs.push(Output::Plot2D(Plot2D {
            base: SedBase::with_id("plot1"),
            curves: vec![Curve2D::Curve(curve)],
            ..Plot2D::default()
        }));
        assert_eq!(doc.check_consistency(), 2);
        assert!(doc.error_log().contains(ErrorCode::CURVE_Y_DATA_REF));
        assert!(doc.error_log().contains(ErrorCode::CURVE_STYLE_REF));
    }

    #[test]
    fn test_variable_ids_are_local_to_their_scope() {
        let mut doc = valid_document();
        doc.data_generators.push(DataGenerator::for_variable(
            "dg_time2",
            Variable::with_symbol("time", "urn:sedml:symbol:time").task_reference("task1"),
        ));
        assert_eq!(doc.check_consistency(), 0);
    }
}
