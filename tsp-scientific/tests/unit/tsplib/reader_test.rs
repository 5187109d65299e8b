use super::*;
use crate::helpers::*;
use std::fs::File;
use std::io::Read;

fn get_square4_problem_string() -> String {
    let mut buffer = "".to_string();

    get_test_resource("../../data/tsplib/square4.tsp")
        .expect("cannot open file")
        .read_to_string(&mut buffer)
        .expect("cannot read file");

    buffer
}

fn get_square4_problem_reader() -> BufReader<File> {
    BufReader::new(get_test_resource("../../data/tsplib/square4.tsp").expect("cannot open file"))
}

#[test]
fn can_read_meta() {
    let mut reader = TsplibReader::new(get_square4_problem_reader());

    reader.read_meta().expect("cannot read meta");

    assert_eq!(reader.name, Some("square4".to_string()));
    assert_eq!(reader.dimension, Some(4));
    assert_eq!(reader.edge_weight_type, Some(EdgeWeightType::Euc2D));
}

#[test]
fn can_read_meta_errors() {
    for &(from, to, error) in &[
        ("TYPE : TSP", "TYPE : ATSP", "expecting 'TSP' as TYPE, got 'ATSP'"),
        ("DIMENSION : 4", "DIMENSION : asd", "cannot parse DIMENSION: 'invalid float literal'"),
        ("EUC_2D", "EXPLICIT", "unsupported EDGE_WEIGHT_TYPE: 'EXPLICIT'"),
        ("NAME : square4", "NAME square4", "expected colon separated string, got: 'NAME square4'"),
        ("NODE_COORD_SECTION", "DISPLAY_DATA_SECTION", "expected colon separated string, got: 'DISPLAY_DATA_SECTION'"),
    ] {
        let content = get_square4_problem_string().replace(from, to);
        let mut reader = TsplibReader::new(BufReader::new(content.as_bytes()));

        let result = reader.read_meta();

        assert_eq!(result, Err(error.into()));
    }
}

#[test]
fn can_read_problem() {
    let instance = get_square4_problem_reader().read_tsplib().expect("cannot read problem");

    assert_eq!(instance.name, "square4");
    assert_eq!(instance.edge_weight_type, EdgeWeightType::Euc2D);
    assert_eq!(instance.cities, vec![(0., 0.), (10., 0.), (0., 10.), (10., 10.)]);
}

#[test]
fn can_read_problem_without_eof_and_with_lenient_header() {
    let content = "NAME: tiny\n  COMMENT : no eof marker\nTYPE:TSP\nEDGE_WEIGHT_TYPE :CEIL_2D\n\nNODE_COORD_SECTION\n\
                   1 0.5 0.5\n2 1.5 0.5\n3 1.0 2.5\n"
        .to_string();

    let instance = content.read_tsplib().expect("cannot read problem");

    assert_eq!(instance.name, "tiny");
    assert_eq!(instance.edge_weight_type, EdgeWeightType::Ceil2D);
    assert_eq!(instance.cities, vec![(0.5, 0.5), (1.5, 0.5), (1.0, 2.5)]);
}

parameterized_test! {can_read_coordinate_errors, (section, error), {
    let header = "NAME : broken\nTYPE : TSP\nDIMENSION : 2\nEDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n";
    let content = format!("{header}{section}EOF\n");

    let result = content.read_tsplib();

    assert_eq!(result.err(), Some(error.to_string().into()));
}}

can_read_coordinate_errors! {
    case_01_missing_coord: ("1 0 0\n2 1\n", "unexpected coord data: '2 1'"),
    case_02_wrong_id: ("1 0 0\n3 1 1\n", "expecting node id 2, got 3"),
    case_03_wrong_dimension: ("1 0 0\n", "DIMENSION is 2, but 1 nodes are specified"),
    case_04_bad_coord: ("1 0 0\n2 x 1\n", "cannot parse coord.0: 'invalid float literal'"),
}

#[test]
fn can_report_missing_edge_weight_type() {
    let content = "NAME : broken\nTYPE : TSP\nNODE_COORD_SECTION\n1 0 0\nEOF\n".to_string();

    assert_eq!(content.read_tsplib().err(), Some("EDGE_WEIGHT_TYPE is not specified".into()));
}

#[test]
fn can_create_cost_matrix() {
    let matrix = create_square4_instance().to_cost_matrix().expect("cannot create matrix");

    assert_eq!(matrix.size(), 4);
    assert_eq!(matrix.cost(0, 1), 10.);
    assert_eq!(matrix.cost(0, 3), 14.);
    assert!(matrix.is_symmetric());
}
