use cadence_document::{
    DocumentError, Element, Node, parse_document, parse_fragment, write_document, write_fragment,
};
use pretty_assertions::assert_eq;

const SAMPLE: &str = r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE entity PUBLIC "-//UC Berkeley//DTD MoML 1//EN"
    "http://ptolemy.eecs.berkeley.edu/xml/dtd/MoML_1.dtd">
<!-- generated -->
<entity name="Constant" class="ptolemy.kernel.ComponentEntity">
  <property name="entityId" value="urn:lsid:kepler-project.org:actor:1:1" class="org.kepler.moml.NamedObjId"/>
  <property name='class' value='ptolemy.actor.lib.Const'>
    <property name="id" value="urn:lsid:kepler-project.org:class:1:1"/>
  </property>
  <doc>Emits a &lt;constant&gt; value</doc>
</entity>
"#;

// ── Reading ──────────────────────────────────────────────────────

#[test]
fn reads_root_and_attributes() {
    let root = parse_document(SAMPLE).unwrap();
    assert_eq!(root.tag(), "entity");
    assert_eq!(root.name(), Some("Constant"));
    assert_eq!(root.class(), Some("ptolemy.kernel.ComponentEntity"));
    assert_eq!(root.elements().count(), 3);
}

#[test]
fn reads_nested_properties_with_single_quotes() {
    let root = parse_document(SAMPLE).unwrap();
    let class = root.find_property("class").unwrap();
    assert_eq!(class.value(), Some("ptolemy.actor.lib.Const"));
    let id = class.find_property("id").unwrap();
    assert_eq!(id.value(), Some("urn:lsid:kepler-project.org:class:1:1"));
}

#[test]
fn unescapes_text_content() {
    let root = parse_document(SAMPLE).unwrap();
    let doc = root.elements().find(|e| e.tag() == "doc").unwrap();
    assert_eq!(doc.text(), "Emits a <constant> value");
}

#[test]
fn whitespace_only_text_is_dropped() {
    let root = parse_document("<a>\n   <b/>\n</a>").unwrap();
    assert_eq!(root.children.len(), 1);
    assert!(matches!(root.children[0], Node::Element(_)));
}

#[test]
fn cdata_is_read_as_text() {
    let root = parse_document("<doc><![CDATA[a < b]]></doc>").unwrap();
    assert_eq!(root.text(), "a < b");
}

#[test]
fn fragment_reads_siblings() {
    let links = parse_fragment(r#"<link port="a" relation="r"/><link port="b" relation="r"/>"#)
        .unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[1].attr("port"), Some("b"));
}

#[test]
fn empty_fragment_is_empty() {
    assert!(parse_fragment("  <!-- nothing -->  ").unwrap().is_empty());
}

// ── Errors ───────────────────────────────────────────────────────

#[test]
fn empty_document_is_rejected() {
    assert_eq!(parse_document("<?xml version=\"1.0\"?>").unwrap_err(), DocumentError::Empty);
}

#[test]
fn mismatched_tag_is_reported() {
    let err = parse_document("<a><b></a></b>").unwrap_err();
    assert_eq!(
        err,
        DocumentError::MismatchedTag {
            expected: "b".into(),
            found: "a".into()
        }
    );
}

#[test]
fn unterminated_element_is_eof() {
    assert!(matches!(
        parse_document("<a><b/>").unwrap_err(),
        DocumentError::UnexpectedEof(_)
    ));
}

#[test]
fn unquoted_attribute_is_syntax_error() {
    assert!(matches!(
        parse_document("<a name=x/>").unwrap_err(),
        DocumentError::Syntax { .. }
    ));
}

#[test]
fn duplicate_attribute_is_rejected() {
    let err = parse_document(r#"<a name="x" name="y"/>"#).unwrap_err();
    assert!(err.to_string().contains("duplicate attribute"));
}

#[test]
fn trailing_content_is_rejected() {
    assert!(parse_document("<a/><b/>").is_err());
}

// ── Writing ──────────────────────────────────────────────────────

#[test]
fn written_document_reads_back_identically() {
    let root = parse_document(SAMPLE).unwrap();
    let text = write_document(&root);
    assert!(text.starts_with("<?xml version=\"1.0\"?>\n"));
    assert_eq!(parse_document(&text).unwrap(), root);
}

#[test]
fn writer_output_is_stable() {
    let root = parse_document(SAMPLE).unwrap();
    let once = write_document(&root);
    let twice = write_document(&parse_document(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn builder_produces_expected_markup() {
    let element = Element::new("entity")
        .with_attr("name", "A")
        .with_child(Element::property("direction", "input", ""));
    assert_eq!(
        write_fragment(&element),
        "<entity name=\"A\">\n  <property name=\"direction\" value=\"input\"/>\n</entity>"
    );
}

#[test]
fn set_attr_replaces_in_place() {
    let mut element = Element::new("a").with_attr("x", "1").with_attr("y", "2");
    element.set_attr("x", "3");
    assert_eq!(
        element.attributes,
        vec![("x".to_string(), "3".to_string()), ("y".to_string(), "2".to_string())]
    );
}
