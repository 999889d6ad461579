use super::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

fn with_ctx<T>(f: impl FnOnce(&Context) -> T) -> T {
    let table = fixture("device.json");
    let definition = fixture("keyboard.json");
    f(&Context {
        table: Some(table.as_path()),
        definition: Some(definition.as_path()),
    })
}

fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).expect("command to succeed");
    String::from_utf8(out).unwrap()
}

fn values(values: &[&str]) -> ValuesArgs {
    ValuesArgs {
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn encode_cmd() {
    let args = EncodeArgs {
        codes: vec!["KC_A".into(), "MO(1)".into(), "TO(40)".into()],
    };
    let text = with_ctx(|ctx| output(|out| encode(out, ctx, &args)));
    assert_eq!(text, "KC_A: 0x0004\nMO(1): 0x5221\nTO(40): 0x501f\n");

    let args = EncodeArgs {
        codes: vec!["KC_NOPE".into()],
    };
    let err = with_ctx(|ctx| encode(&mut io::sink(), ctx, &args)).unwrap_err();
    assert_eq!(err.to_string(), "Unable to find a value for KC_NOPE");
}

#[test]
fn table_is_required() {
    let ctx = Context {
        table: None,
        definition: None,
    };
    let err = decode(&mut io::sink(), &ctx, &values(&["1"])).unwrap_err();
    assert_eq!(err.to_string(), "A device table is required (--table)");
}

#[test]
fn decode_cmd() {
    let args = values(&["0x29", "0x7c00", "0x5005", "300"]);
    let text = with_ctx(|ctx| output(|out| decode(out, ctx, &args)));
    assert_eq!(
        text,
        "0x0029: KC_ESC\n0x7c00: RESET\n0x5005: TO(5)\n0x012c: 0x12c\n"
    );

    let err = with_ctx(|ctx| decode(&mut io::sink(), ctx, &values(&["KC_A"]))).unwrap_err();
    assert_eq!(err.to_string(), "Invalid value \"KC_A\"");
}

#[test]
fn label_cmd() {
    let args = LabelArgs {
        size: 100,
        values: values(&["0x2a", "0x39", "0xa4", "0x1e"]),
    };
    let text = with_ctx(|ctx| output(|out| label(out, ctx, &args)));
    assert_eq!(
        text,
        "0x002a: Bksp\n0x0039: CAPS\n0x00a4: KC_EXSEL\n0x001e: ! 1\n"
    );
}

#[test]
fn validate_cmd() {
    let args = ValidateArgs {
        verbose: true,
        plain: false,
        file: fixture("default.kc"),
    };
    let text = with_ctx(|ctx| output(|out| validate(out, ctx, &args)));
    assert_eq!(text, "layers:      3\nkeys:        6\nvalues:      18\n");
}

#[test]
fn invalid_keymap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[layer]\nKC_A KC_B\nKC_C FOO(1)\n").unwrap();

    let args = ValidateArgs {
        verbose: false,
        plain: true,
        file: file.path().to_owned(),
    };
    let err = with_ctx(|ctx| validate(&mut io::sink(), ctx, &args)).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error: Invalid keycode family in FOO(1) \n"));
    assert!(message.ends_with(":3:5\n  3 | KC_C FOO(1)\n"));

    let args = CompileArgs {
        plain: false,
        file: file.path().with_extension("missing"),
    };
    let err = with_ctx(|ctx| compile(&mut io::sink(), ctx, &args)).unwrap_err();
    assert!(err.to_string().starts_with("Failed to compile \""));
}

#[test]
fn compile_then_decompile() {
    let args = CompileArgs {
        plain: true,
        file: fixture("default.kc"),
    };
    let text = with_ctx(|ctx| output(|out| compile(out, ctx, &args)));
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "0x0029 0x001e 0x001f 0x5221 0x0004 0x0028"
    );

    let args = DecompileArgs {
        layer_len: 6,
        cols: 3,
        values: ValuesArgs {
            values: text.split_whitespace().map(String::from).collect(),
        },
    };
    let text = with_ctx(|ctx| output(|out| decompile(out, ctx, &args)));
    assert!(text.starts_with("[layer] # 0\nKC_ESC KC_1   KC_2\nMO(1)  KC_A   KC_ENT\n"));
    assert!(text.contains("\n[layer] # 1\nRESET   KC_F1   KC_F2\n"));
}

#[test]
fn keycodes_list_cmd() {
    let args = ListKeycodesArgs {
        verbose: false,
        menu: Some("media".into()),
        pattern: Some("VOL".into()),
    };
    let text = output(|out| list_keycodes(out, &args));
    assert_eq!(text, "KC_VOLD\nKC_VOLU\n");

    let args = ListKeycodesArgs {
        verbose: false,
        menu: Some("lighting".into()),
        pattern: None,
    };
    let err = list_keycodes(&mut io::sink(), &args).unwrap_err();
    assert_eq!(err.to_string(), "Unknown menu lighting");
}

#[test]
fn keyboard_keycodes_cmd() {
    let text = with_ctx(|ctx| output(|out| keyboard_keycodes(out, ctx, &JsonArgs { json: true })));
    let list: serde_json::Value = serde_json::from_str(&text).unwrap();
    let codes: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["code"].as_str().unwrap().to_string())
        .collect();
    assert!(codes.contains(&"RGB_TOG".to_string()));
    assert!(!codes.contains(&"BR_INC".to_string()));
    assert!(codes.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn other_keycodes_cmd() {
    let text = with_ctx(|ctx| output(|out| other_keycodes(out, ctx, &JsonArgs { json: true })));
    let list: serde_json::Value = serde_json::from_str(&text).unwrap();
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ENTER", "ESCAPE", "EXSEL", "QK BOOT", "QK REBOOT"]);
}
