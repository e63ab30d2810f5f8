#![allow(non_snake_case)]

use serde::{Deserialize, Serialize};
use serde_qdn::{
    format, from_slice, from_str, from_str_with_options, to_string, to_string_pretty,
    to_string_with_options, to_vec, Complex, Error, QdnOptions, ScalarKind,
};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
struct Point {
    X: i32,
    Y: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Line {
    start: Point,
    end: Point,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Limits {
    max_connections: u32,
    timeout_ms: u64,
    backoff: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
    tls: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Service {
    name: String,
    endpoint: Endpoint,
    limits: Limits,
    replicas: u8,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Signal {
    id: i64,
    gain: f32,
    phase: Complex,
    label: String,
}

fn service() -> Service {
    Service {
        name: "billing".to_string(),
        endpoint: Endpoint {
            host: "10.0.0.7".to_string(),
            port: 8443,
            tls: true,
        },
        limits: Limits {
            max_connections: 512,
            timeout_ms: 30_000,
            backoff: 1.5,
        },
        replicas: 3,
    }
}

#[test]
fn test_point_exact_buffer() {
    let point = Point { X: 3, Y: -7 };
    let qdn = to_string(&point).unwrap();
    assert_eq!(qdn, "Point<X=3,Y=-7,>");

    let point_back: Point = from_str("Point<X=3,Y=-7,>").unwrap();
    assert_eq!(point_back, point);
}

#[test]
fn test_line_exact_buffer() {
    let line = Line {
        start: Point { X: 1, Y: 2 },
        end: Point { X: 3, Y: 4 },
    };
    let qdn = to_string(&line).unwrap();
    assert_eq!(qdn, "Line<Point<X=1,Y=2,>,Point<X=3,Y=4,>,>");

    let line_back: Line = from_str(&qdn).unwrap();
    assert_eq!(line_back, line);
}

#[test]
fn test_mixed_nested_and_scalar_fields() {
    let service = service();
    let qdn = to_string(&service).unwrap();
    assert_eq!(
        qdn,
        "Service<name=billing,Endpoint<host=10.0.0.7,port=8443,tls=true,>,\
         Limits<max_connections=512,timeout_ms=30000,backoff=1.5,>,replicas=3,>"
    );

    let service_back: Service = from_str(&qdn).unwrap();
    assert_eq!(service_back, service);
}

#[test]
fn test_three_levels_deep() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Leaf {
        value: i16,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Branch {
        left: Leaf,
        weight: f64,
        right: Leaf,
    }
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Tree {
        root: Branch,
        spare: Branch,
        size: usize,
    }

    let tree = Tree {
        root: Branch {
            left: Leaf { value: -1 },
            weight: 0.25,
            right: Leaf { value: 1 },
        },
        spare: Branch {
            left: Leaf { value: 100 },
            weight: -3.75,
            right: Leaf { value: -100 },
        },
        size: 6,
    };

    let qdn = to_string(&tree).unwrap();
    let tree_back: Tree = from_str(&qdn).unwrap();
    assert_eq!(tree_back, tree);
}

#[test]
fn test_positional_not_name_matching() {
    let renamed = "Service<a=billing,Endpoint<b=10.0.0.7,c=8443,d=true,>,\
                   Limits<e=512,f=30000,g=1.5,>,h=3,>";
    let service_back: Service = from_str(renamed).unwrap();
    assert_eq!(service_back, service());
}

#[test]
fn test_complex_negative_imaginary() {
    let signal = Signal {
        id: -9,
        gain: 0.75,
        phase: Complex::new(1.5, -2.25),
        label: "carrier".to_string(),
    };
    let qdn = to_string(&signal).unwrap();
    assert_eq!(qdn, "Signal<id=-9,gain=0.75,phase=1.5;-2.25,label=carrier,>");

    let signal_back: Signal = from_str(&qdn).unwrap();
    assert_eq!(signal_back, signal);
}

#[test]
fn test_complex_without_separator_is_conversion_error() {
    let result: Result<Signal, Error> =
        from_str("Signal<id=1,gain=1,phase=1.5,label=x,>");
    match result {
        Err(Error::Conversion { text, kind, .. }) => {
            assert_eq!(text, "1.5");
            assert_eq!(kind, ScalarKind::Complex);
        }
        other => panic!("expected conversion error, got {:?}", other),
    }
}

#[test]
fn test_float_bit_exact() {
    #[derive(Serialize, Deserialize, Debug)]
    struct Sample {
        a: f64,
        b: f64,
        c: f64,
        d: f32,
    }

    let sample = Sample {
        a: 0.1 + 0.2,
        b: 2.0f64.sqrt(),
        c: 1.7976931348623157e308,
        d: std::f32::consts::E,
    };
    let qdn = to_string(&sample).unwrap();
    let back: Sample = from_str(&qdn).unwrap();
    assert_eq!(back.a.to_bits(), sample.a.to_bits());
    assert_eq!(back.b.to_bits(), sample.b.to_bits());
    assert_eq!(back.c.to_bits(), sample.c.to_bits());
    assert_eq!(back.d.to_bits(), sample.d.to_bits());
}

#[test]
fn test_empty_shape_rejected() {
    #[derive(Serialize, Deserialize, Debug)]
    struct Empty {}

    assert!(matches!(to_string(&Empty {}), Err(Error::EmptyShape(_))));
    let decoded: Result<Empty, Error> = from_str("Empty<>");
    assert!(matches!(decoded, Err(Error::EmptyShape(_))));
}

#[test]
fn test_not_a_record() {
    assert!(matches!(to_string(&42u8), Err(Error::NotARecord(_))));
    assert!(matches!(to_string("text"), Err(Error::NotARecord(_))));
    let decoded: Result<String, Error> = from_str("Point<X=3,>");
    assert!(matches!(decoded, Err(Error::NotARecord(_))));
}

#[test]
fn test_name_mismatch() {
    let result: Result<Point, Error> = from_str("Vector<X=3,Y=-7,>");
    assert_eq!(
        result,
        Err(Error::NameMismatch {
            name: "Point".to_string()
        })
    );
}

#[test]
fn test_conversion_errors() {
    let result: Result<Point, Error> = from_str("Point<X=three,Y=-7,>");
    assert!(matches!(
        result,
        Err(Error::Conversion {
            kind: ScalarKind::I32,
            ..
        })
    ));

    let result: Result<Endpoint, Error> = from_str("Endpoint<host=a,port=70000,tls=true,>");
    assert!(matches!(
        result,
        Err(Error::Conversion {
            kind: ScalarKind::U16,
            ..
        })
    ));

    let result: Result<Endpoint, Error> = from_str("Endpoint<host=a,port=1,tls=maybe,>");
    assert!(matches!(
        result,
        Err(Error::Conversion {
            kind: ScalarKind::Bool,
            ..
        })
    ));
}

#[test]
fn test_malformed_buffers() {
    let missing_close: Result<Line, Error> = from_str("Line<Point<X=1,Y=2,");
    assert!(matches!(missing_close, Err(Error::MalformedBuffer { .. })));

    let missing_field: Result<Point, Error> = from_str("Point<X=1,>");
    assert!(matches!(
        missing_field,
        Err(Error::MalformedBuffer { expected: '=', .. })
    ));

    let no_open: Result<Point, Error> = from_str("Point");
    assert!(matches!(
        no_open,
        Err(Error::MalformedBuffer { expected: '<', .. })
    ));
}

#[test]
fn test_reserved_bytes_rejected() {
    let endpoint = Endpoint {
        host: "a=b".to_string(),
        port: 1,
        tls: false,
    };
    assert!(matches!(
        to_string(&endpoint),
        Err(Error::ReservedByte { byte: '=', .. })
    ));

    let endpoint = Endpoint {
        host: "\"quoted\"".to_string(),
        port: 1,
        tls: false,
    };
    assert!(matches!(
        to_string(&endpoint),
        Err(Error::ReservedByte { byte: '"', .. })
    ));
}

#[test]
fn test_quoted_strings_round_trip() {
    let options = QdnOptions::new().with_quoted_strings(true);
    let endpoint = Endpoint {
        host: "example.org".to_string(),
        port: 443,
        tls: true,
    };
    let qdn = to_string_with_options(&endpoint, options).unwrap();
    assert_eq!(qdn, r#"Endpoint<host="example.org",port=443,tls=true,>"#);

    let endpoint_back: Endpoint = from_str(&qdn).unwrap();
    assert_eq!(endpoint_back, endpoint);
}

#[test]
fn test_empty_string_round_trip() {
    let endpoint = Endpoint {
        host: String::new(),
        port: 0,
        tls: false,
    };
    let qdn = to_string(&endpoint).unwrap();
    assert_eq!(qdn, "Endpoint<host=,port=0,tls=false,>");
    let endpoint_back: Endpoint = from_str(&qdn).unwrap();
    assert_eq!(endpoint_back, endpoint);
}

#[test]
fn test_depth_limit() {
    let options = QdnOptions::new().with_max_depth(1);
    assert_eq!(
        to_string_with_options(&service(), options.clone()),
        Err(Error::DepthLimitExceeded { limit: 1 })
    );

    let qdn = to_string(&service()).unwrap();
    let decoded: Result<Service, Error> = from_str_with_options(&qdn, options);
    assert_eq!(decoded, Err(Error::DepthLimitExceeded { limit: 1 }));
}

#[test]
fn test_bytes_api() {
    let bytes = to_vec(&Point { X: 0, Y: 0 }).unwrap();
    assert_eq!(bytes, b"Point<X=0,Y=0,>");
    let point: Point = from_slice(&bytes).unwrap();
    assert_eq!(point, Point { X: 0, Y: 0 });
}

#[test]
fn test_newtype_fields_are_transparent() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Meters(f64);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Route {
        length: Meters,
        stops: u8,
    }

    let route = Route {
        length: Meters(12.5),
        stops: 4,
    };
    let qdn = to_string(&route).unwrap();
    assert_eq!(qdn, "Route<length=12.5,stops=4,>");
    assert_eq!(from_str::<Route>(&qdn).unwrap(), route);
}

#[test]
fn test_pretty_output() {
    let line = Line {
        start: Point { X: 1, Y: 2 },
        end: Point { X: 3, Y: 4 },
    };
    let pretty = to_string_pretty(&line).unwrap();
    let expected = "Line\n<\n\
                    \tPoint\n\t<\n\t\tX=1,\n\t\tY=2,\n\t>,\n\
                    \tPoint\n\t<\n\t\tX=3,\n\t\tY=4,\n\t>,\n\
                    >";
    assert_eq!(pretty, expected);
}

#[test]
fn test_format_twice_fails() {
    let qdn = to_vec(&service()).unwrap();
    let once = format(&qdn).unwrap();
    assert_eq!(format(&once), Err(Error::AlreadyFormatted));
}
