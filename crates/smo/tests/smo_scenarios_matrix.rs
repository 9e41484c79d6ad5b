use smo::cbor::{from_cbor_bytes, to_cbor_bytes};
use smo::json::{to_json_bytes, JsonOptions};
use smo::{
    from_slice, from_value, serialize, to_value, to_vec, CborBridgeError, CborItem, Decode,
    DecodeOptions, Decoder, Encode, Encoder, Error, JsonError, KeyDecodingStrategy,
    KeyEncodingStrategy, Result, SerializationFormat, SmoDecoder, SmoEncoder, SmoValue,
};

#[derive(Debug, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

impl Encode for Person {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed_container();
        keyed.encode("name", &self.name)?;
        keyed.encode("age", &self.age)
    }
}

impl Decode for Person {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed_container()?;
        Ok(Person {
            name: keyed.decode("name")?,
            age: keyed.decode("age")?,
        })
    }
}

fn ham() -> Person {
    Person {
        name: "Ham".into(),
        age: 27,
    }
}

const HAM_NAME_FIRST: &[u8] = &[
    0xa2, 0x64, b'n', b'a', b'm', b'e', 0x63, b'H', b'a', b'm', 0x63, b'a', b'g', b'e', 0x18, 0x1b,
];
const HAM_AGE_FIRST: &[u8] = &[
    0xa2, 0x63, b'a', b'g', b'e', 0x18, 0x1b, 0x64, b'n', b'a', b'm', b'e', 0x63, b'H', b'a', b'm',
];

#[test]
fn record_encodes_to_cbor_and_back() {
    let value = to_value(&ham()).unwrap();
    assert_eq!(
        value,
        SmoValue::from_iter([("age", SmoValue::from(27)), ("name", SmoValue::from("Ham"))])
    );

    let bytes = to_vec(&ham(), SerializationFormat::Cbor).unwrap();
    assert_eq!(bytes, HAM_NAME_FIRST);

    for encoded in [HAM_NAME_FIRST, HAM_AGE_FIRST] {
        let back: Person = from_slice(encoded, SerializationFormat::Cbor).unwrap();
        assert_eq!(back, ham());
    }
}

#[test]
fn record_round_trips_through_json() {
    let bytes = to_vec(&ham(), SerializationFormat::Json).unwrap();
    assert_eq!(bytes, br#"{"name":"Ham","age":27}"#);
    let back: Person = from_slice(&bytes, SerializationFormat::Json).unwrap();
    assert_eq!(back, ham());
}

#[test]
fn cbor_array_decodes_as_integer_sequence() {
    let numbers: Vec<i64> = from_slice(&[0x83, 0x01, 0x02, 0x03], SerializationFormat::Cbor).unwrap();
    assert_eq!(numbers, [1, 2, 3]);

    let small: Vec<u8> = from_slice(&[0x83, 0x01, 0x02, 0x03], SerializationFormat::Cbor).unwrap();
    assert_eq!(small, [1, 2, 3]);
}

#[test]
fn indefinite_byte_string_bridges_to_bytes() {
    let bytes = [0x5f, 0x42, 0x01, 0x02, 0x43, 0x03, 0x04, 0x05, 0xff];
    assert_eq!(
        smo_cbor::decode(&bytes).unwrap(),
        CborItem::ByteString(vec![1, 2, 3, 4, 5])
    );
    assert_eq!(
        from_cbor_bytes(&bytes).unwrap(),
        SmoValue::Bytes(vec![1, 2, 3, 4, 5])
    );
}

#[test]
fn undefined_is_rejected_by_json_at_any_depth() {
    let nested = [
        SmoValue::undefined(),
        SmoValue::from(vec![SmoValue::from(1), SmoValue::undefined()]),
        SmoValue::from_iter([(
            "a",
            SmoValue::from_iter([("b", SmoValue::from(vec![SmoValue::undefined()]))]),
        )]),
    ];
    let options = JsonOptions::default().with_allow_fragments(true);
    for value in &nested {
        assert_eq!(
            to_json_bytes(value, &options),
            Err(JsonError::UnsupportedSmoValue)
        );
        assert_eq!(
            serialize(value, SerializationFormat::Json),
            Err(Error::Json(JsonError::UnsupportedSmoValue))
        );

        let bytes = serialize(value, SerializationFormat::Cbor).unwrap();
        assert_eq!(&from_cbor_bytes(&bytes).unwrap(), value);
    }
}

#[test]
fn missing_snake_case_key_names_both_spellings() {
    #[derive(Debug)]
    struct Account {
        _user_name: String,
    }
    impl Decode for Account {
        fn decode(decoder: &Decoder<'_>) -> Result<Self> {
            let keyed = decoder.keyed_container()?;
            Ok(Account {
                _user_name: keyed.decode("userName")?,
            })
        }
    }

    let decoder = SmoDecoder::with_options(
        DecodeOptions::default().with_key_decoding_strategy(KeyDecodingStrategy::ConvertFromSnakeCase),
    );
    let value = SmoValue::from_iter([("full_name", SmoValue::from("Ham"))]);
    let err = decoder.decode::<Account>(&value).unwrap_err();
    let Error::KeyNotFound { key, message, path } = err else {
        panic!("expected KeyNotFound, got {err:?}");
    };
    assert_eq!(key, "userName");
    assert!(path.is_empty());
    assert!(message.contains("userName"));
    assert!(message.contains("user_name"));
}

#[test]
fn snake_case_keys_round_trip() {
    #[derive(Debug, PartialEq)]
    struct Device {
        device_id: i64,
        last_seen_at: Option<String>,
    }
    impl Encode for Device {
        fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
            let mut keyed = encoder.keyed_container();
            keyed.encode("deviceId", &self.device_id)?;
            keyed.encode("lastSeenAt", &self.last_seen_at)
        }
    }
    impl Decode for Device {
        fn decode(decoder: &Decoder<'_>) -> Result<Self> {
            let keyed = decoder.keyed_container()?;
            Ok(Device {
                device_id: keyed.decode("deviceId")?,
                last_seen_at: keyed.decode_if_present("lastSeenAt")?,
            })
        }
    }

    let device = Device {
        device_id: 9,
        last_seen_at: None,
    };
    let mut encoder = SmoEncoder::new();
    encoder.set_key_encoding_strategy(KeyEncodingStrategy::ConvertToSnakeCase);
    let value = encoder.encode(&device).unwrap();
    assert_eq!(
        value,
        SmoValue::from_iter([("device_id", SmoValue::from(9)), ("last_seen_at", SmoValue::null())])
    );

    let mut decoder = SmoDecoder::new();
    decoder.set_key_decoding_strategy(KeyDecodingStrategy::ConvertFromSnakeCase);
    assert_eq!(decoder.decode::<Device>(&value).unwrap(), device);

    // Plain keys fail without the strategy.
    assert!(matches!(
        from_value::<Device>(&value),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn unsigned_values_past_i64_fall_back_to_float() {
    assert_eq!(
        to_value(&(1u64 << 63)).unwrap(),
        SmoValue::Float(9_223_372_036_854_775_808.0)
    );
    assert_eq!(to_value(&(i64::MAX as u64)).unwrap(), SmoValue::Integer(i64::MAX));
    assert!(matches!(
        to_value(&(u64::MAX - 1)),
        Err(Error::InvalidValue { .. })
    ));

    let back: u64 = from_value(&SmoValue::Float(9_223_372_036_854_775_808.0)).unwrap();
    assert_eq!(back, 1 << 63);
}

#[test]
fn non_finite_floats_narrow_into_f32() {
    let nan: f32 = from_value(&SmoValue::Float(f64::NAN)).unwrap();
    assert!(nan.is_nan());
    let inf: f32 = from_value(&SmoValue::Float(f64::INFINITY)).unwrap();
    assert_eq!(inf, f32::INFINITY);
    let neg: f32 = from_value(&SmoValue::Float(f64::NEG_INFINITY)).unwrap();
    assert_eq!(neg, f32::NEG_INFINITY);

    let half: f32 = from_value(&SmoValue::Float(0.5)).unwrap();
    assert_eq!(half, 0.5);
    assert!(matches!(
        from_value::<f32>(&SmoValue::Float(0.1)),
        Err(Error::TypeMismatch { expected: "f32", .. })
    ));
}

#[test]
fn integer_decoding_checks_range_and_integrality() {
    assert_eq!(from_value::<i8>(&SmoValue::Float(-128.0)), Ok(-128));
    assert!(matches!(
        from_value::<i8>(&SmoValue::from(128)),
        Err(Error::TypeMismatch { expected: "i8", found: "an integer", .. })
    ));
    assert!(matches!(
        from_value::<i32>(&SmoValue::Float(1.5)),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        from_value::<u16>(&SmoValue::from(-1)),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        from_value::<i64>(&SmoValue::from("7")),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn cbor_integers_outside_i64_are_rejected() {
    // 0x3b ff..ff encodes -2^64.
    let too_negative = [0x3b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    assert_eq!(
        from_cbor_bytes(&too_negative),
        Err(CborBridgeError::UnsupportedRange)
    );
    let too_big = [0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    assert_eq!(
        from_slice::<SmoValue>(&too_big, SerializationFormat::Cbor),
        Err(Error::Cbor(CborBridgeError::UnsupportedRange))
    );

    let min = [0x3b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    assert_eq!(from_cbor_bytes(&min), Ok(SmoValue::Integer(i64::MIN)));
    assert_eq!(to_cbor_bytes(&SmoValue::Integer(i64::MIN)), min);
}

#[test]
fn unkeyed_nil_peek_only_consumes_null() {
    struct Sparse(Vec<Option<i32>>);
    impl Decode for Sparse {
        fn decode(decoder: &Decoder<'_>) -> Result<Self> {
            let mut unkeyed = decoder.unkeyed_container()?;
            let mut out = Vec::new();
            while !unkeyed.is_at_end() {
                if unkeyed.decode_nil()? {
                    out.push(None);
                } else {
                    out.push(Some(unkeyed.decode()?));
                }
            }
            Ok(Sparse(out))
        }
    }

    let value = SmoValue::from(vec![
        SmoValue::from(1),
        SmoValue::null(),
        SmoValue::null(),
        SmoValue::from(4),
    ]);
    let Sparse(items) = from_value(&value).unwrap();
    assert_eq!(items, [Some(1), None, None, Some(4)]);

    let value = SmoValue::from(vec![SmoValue::from(5)]);
    let decoder = SmoDecoder::new();
    struct PeekThenRead(bool, i32);
    impl Decode for PeekThenRead {
        fn decode(decoder: &Decoder<'_>) -> Result<Self> {
            let mut unkeyed = decoder.unkeyed_container()?;
            let was_nil = unkeyed.decode_nil()?;
            assert_eq!(unkeyed.current_index(), 0);
            let n = unkeyed.decode()?;
            assert!(unkeyed.is_at_end());
            assert!(matches!(unkeyed.decode_nil(), Err(Error::DataCorrupted { .. })));
            Ok(PeekThenRead(was_nil, n))
        }
    }
    let PeekThenRead(was_nil, n) = decoder.decode(&value).unwrap();
    assert!(!was_nil);
    assert_eq!(n, 5);
}

#[test]
fn json_top_level_fragments_follow_options() {
    let fragment = SmoValue::from("solo");
    assert_eq!(
        to_json_bytes(&fragment, &JsonOptions::default()),
        Err(JsonError::InvalidTopLevelElement)
    );
    assert_eq!(
        serialize(&fragment, SerializationFormat::Json).unwrap(),
        b"\"solo\""
    );
    assert!(matches!(
        serialize(&SmoValue::Float(f64::NAN), SerializationFormat::Json),
        Err(Error::Json(JsonError::NonFiniteNumber(_)))
    ));
}
