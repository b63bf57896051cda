use crate::canopy_pipeline::common::error::CanopyError;
use crate::correlation::{
    AxisSelection, prepare_table, CANOPY_COVERAGE_COLUMN, CorrelationConfig, DEFAULT_MANUAL_ENTRY, DataTable,
    ENVIRONMENT_COLUMNS, Polynomial, WATER_TEMP_MEAN_COLUMN, AIR_TEMP_MEAN_COLUMN, correlate,
    r_squared,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_manual_entry_default_parses() {
    let table = DataTable::from_text(DEFAULT_MANUAL_ENTRY).unwrap();

    assert_eq!(table.headers(), ["Property_1", "Property_2"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.numeric_column("Property_2").unwrap(), [10.0, 15.0]);
}

#[test]
fn test_ragged_csv_is_rejected() {
    let result = DataTable::from_text("a,b\n1,2\n3\n");
    assert!(result.is_err());
}

#[test]
fn test_numeric_column_fails_fast() {
    let table = DataTable::from_text("Day,Temp\nmon,20\ntue,\n").unwrap();

    let result = table.numeric_column("Temp");
    assert!(matches!(
        result,
        Err(CanopyError::NonNumericValue { row: 1, .. })
    ));
    assert!(matches!(
        table.numeric_column("Humidity"),
        Err(CanopyError::ColumnNotFound(_))
    ));
}

#[test]
fn test_with_column_names_requires_exact_count() {
    let table = DataTable::from_text("a,b,c\n1,2,3\n").unwrap();

    let renamed = table.clone().with_column_names(&["x", "y", "z"]).unwrap();
    assert_eq!(renamed.headers(), ["x", "y", "z"]);

    let result = table.with_column_names(&ENVIRONMENT_COLUMNS);
    assert!(matches!(
        result,
        Err(CanopyError::ColumnCountMismatch { expected: 3, found: 16 })
    ));
}

#[test]
fn test_select_axes_prefers_named_pair() {
    let text = format!("Day,{},{},{}\n1,20,18,5\n", AIR_TEMP_MEAN_COLUMN, WATER_TEMP_MEAN_COLUMN, CANOPY_COVERAGE_COLUMN);
    let table = DataTable::from_text(&text).unwrap();

    assert_eq!(
        table.select_axes(AIR_TEMP_MEAN_COLUMN, CANOPY_COVERAGE_COLUMN),
        Some((AIR_TEMP_MEAN_COLUMN.to_string(), CANOPY_COVERAGE_COLUMN.to_string()))
    );
    assert_eq!(
        table.select_axes("Missing", CANOPY_COVERAGE_COLUMN),
        Some(("Day".to_string(), AIR_TEMP_MEAN_COLUMN.to_string()))
    );
}

#[test]
fn test_select_axes_single_column() {
    let table = DataTable::from_text("only\n1\n").unwrap();
    assert_eq!(
        table.select_axes("a", "b"),
        Some(("only".to_string(), "only".to_string()))
    );
}

#[test]
fn test_csv_export_has_no_index_column() {
    let table = DataTable::from_text("a,b\n1,2\n3,4\n").unwrap();
    assert_eq!(table.to_csv_string().unwrap(), "a,b\n1,2\n3,4\n");
}

#[test]
fn test_fit_recovers_exact_quadratic() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|x| 2.0 * x * x - 3.0 * x + 1.0).collect();

    let poly = Polynomial::fit(&x, &y, 2).unwrap();

    assert_eq!(poly.degree(), 2);
    let c = poly.coefficients();
    assert!(close(c[0], 1.0));
    assert!(close(c[1], -3.0));
    assert!(close(c[2], 2.0));
    assert!(close(r_squared(&y, &poly.evaluate_all(&x)).unwrap(), 1.0));
}

#[test]
fn test_fit_linear_least_squares() {
    // Best line through (0,0), (1,1), (2,1) is y = 0.5x + 1/6.
    let poly = Polynomial::fit(&[0.0, 1.0, 2.0], &[0.0, 1.0, 1.0], 1).unwrap();

    assert!(close(poly.coefficients()[0], 1.0 / 6.0));
    assert!(close(poly.coefficients()[1], 0.5));
}

#[test]
fn test_fit_high_degree_stays_stable() {
    let x: Vec<f64> = (0..40).map(|i| -2.0 + i as f64 * 0.1).collect();
    let y: Vec<f64> = x.iter().map(|x| 0.5 * x.powi(3) - x).collect();

    let poly = Polynomial::fit(&x, &y, 10).unwrap();
    let r2 = r_squared(&y, &poly.evaluate_all(&x)).unwrap();

    assert!(r2 > 0.999_999);
}

#[test]
fn test_fit_input_errors() {
    assert!(matches!(
        Polynomial::fit(&[1.0, 2.0], &[1.0], 1),
        Err(CanopyError::FitError(_))
    ));
    assert!(matches!(
        Polynomial::fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 3),
        Err(CanopyError::FitError(_))
    ));
    assert!(matches!(
        Polynomial::fit(&[1.0, f64::NAN], &[1.0, 2.0], 1),
        Err(CanopyError::FitError(_))
    ));
}

#[test]
fn test_r_squared_constant_series() {
    assert_eq!(r_squared(&[2.0, 2.0], &[2.0, 2.0]).unwrap(), 1.0);
    assert_eq!(r_squared(&[2.0, 2.0], &[1.0, 3.0]).unwrap(), 0.0);
}

#[test]
fn test_r_squared_mean_prediction_is_zero() {
    assert!(close(r_squared(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).unwrap(), 0.0));
}

#[test]
fn test_sample_curve_endpoints() {
    let poly = Polynomial::new(vec![1.0, 1.0]);
    let curve = poly.sample_curve(0.0, 10.0, 100);

    assert_eq!(curve.len(), 100);
    assert_eq!(curve[0], (0.0, 1.0));
    assert_eq!(curve[99], (10.0, 11.0));
}

#[test]
fn test_polynomial_display() {
    let poly = Polynomial::new(vec![1.0, -3.0, 2.0]);
    assert_eq!(poly.to_string(), "2.0000 x^2 - 3.0000 x + 1.0000");
}

#[test]
fn test_correlate_uses_preferred_columns() {
    let text = format!(
        "Day,{},{}\n1,20,10\n2,22,14\n3,24,18\n4,26,22\n",
        AIR_TEMP_MEAN_COLUMN, CANOPY_COVERAGE_COLUMN
    );
    let table = DataTable::from_text(&text).unwrap();
    let config = CorrelationConfig::builder().degree(1).build();

    let report = correlate(&table, &config).unwrap();

    assert_eq!(report.x_column, AIR_TEMP_MEAN_COLUMN);
    assert_eq!(report.y_column, CANOPY_COVERAGE_COLUMN);
    assert!(close(report.polynomial.coefficients()[1], 2.0));
    assert!(close(report.r_squared, 1.0));
    assert_eq!(report.fitted.len(), 4);
    assert_eq!(report.curve.len(), 100);
    assert_eq!(report.curve[0].0, 20.0);
    assert_eq!(report.curve[99].0, 26.0);
}

#[test]
fn test_correlate_explicit_columns_and_renaming() {
    let table = DataTable::from_text("c1,c2,c3\n1,1,0\n2,4,0\n3,9,0\n4,16,0\n").unwrap();
    let config = CorrelationConfig::builder()
        .column_names(vec!["t".to_string(), "area".to_string(), "unused".to_string()])
        .x_column("t")
        .y_column("area")
        .degree(2)
        .build();

    let report = correlate(&table, &config).unwrap();

    assert!(close(report.polynomial.coefficients()[2], 1.0));
    assert!(close(report.r_squared, 1.0));
}

#[test]
fn test_correlate_rejects_out_of_range_degree() {
    let table = DataTable::from_text(DEFAULT_MANUAL_ENTRY).unwrap();

    for degree in [0, 11] {
        let config = CorrelationConfig::builder().degree(degree).build();
        assert!(matches!(
            correlate(&table, &config),
            Err(CanopyError::InvalidParameter { .. })
        ));
    }
}

#[test]
fn test_correlate_manual_entry_falls_back_to_first_columns() {
    let table = DataTable::from_text(DEFAULT_MANUAL_ENTRY).unwrap();
    let config = CorrelationConfig::builder().degree(1).build();

    let report = correlate(&table, &config).unwrap();

    assert_eq!(report.x_column, "Property_1");
    assert_eq!(report.y_column, "Property_2");
    assert!(close(report.polynomial.coefficients()[1], 1.0));
}

#[test]
fn test_prepared_table_exports_renamed_headers() {
    let table = DataTable::from_text("c1,c2\n1,2\n").unwrap();
    let config = CorrelationConfig::builder()
        .column_names(vec!["t".to_string(), "area".to_string()])
        .build();

    let prepared = prepare_table(table, &config).unwrap();

    assert_eq!(prepared.to_csv_string().unwrap(), "t,area\n1,2\n");
}

#[test]
fn test_select_axes_independently_falls_back_per_axis() {
    let text = format!("Day,{},Humidity\n1,20,60\n", AIR_TEMP_MEAN_COLUMN);
    let table = DataTable::from_text(&text).unwrap();

    assert_eq!(
        table.select_axes_independently(AIR_TEMP_MEAN_COLUMN, WATER_TEMP_MEAN_COLUMN),
        Some((AIR_TEMP_MEAN_COLUMN.to_string(), "Day".to_string()))
    );
    assert_eq!(
        table.select_axes_independently("Missing", "Humidity"),
        Some(("Day".to_string(), "Humidity".to_string()))
    );
    // The paired rule needs both preferred columns.
    assert_eq!(
        table.select_axes_with(AxisSelection::Paired, AIR_TEMP_MEAN_COLUMN, WATER_TEMP_MEAN_COLUMN),
        Some(("Day".to_string(), AIR_TEMP_MEAN_COLUMN.to_string()))
    );
}

#[test]
fn test_correlate_with_independent_axes() {
    let text = format!("Day,{}\n1,20\n2,22\n3,24\n", AIR_TEMP_MEAN_COLUMN);
    let table = DataTable::from_text(&text).unwrap();
    let config = CorrelationConfig::builder()
        .degree(1)
        .preferred_axes(AIR_TEMP_MEAN_COLUMN, WATER_TEMP_MEAN_COLUMN)
        .axis_selection(AxisSelection::Independent)
        .build();

    let report = correlate(&table, &config).unwrap();

    assert_eq!(report.x_column, AIR_TEMP_MEAN_COLUMN);
    assert_eq!(report.y_column, "Day");
    assert!(close(report.polynomial.coefficients()[1], 0.5));
}
