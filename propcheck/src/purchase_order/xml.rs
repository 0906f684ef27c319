//! XML codec for purchase orders.
//!
//! Parsing happens in two stages. `quick-xml` events are assembled into an
//! [`Element`] tree, and any grammar problem there is a
//! [`ValidationKind::Syntax`] error that stops the parse. The tree is then
//! checked against the purchase order schema, collecting every
//! [`ValidationKind::Schema`] violation before giving up.

use super::{Item, Price, PurchaseOrder, UsAddress};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::fmt;
use thiserror::Error;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const INDENT: &str = "    ";

static PART_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-[A-Z]{2}$").expect("part number pattern is valid"));
static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Whether a document broke the XML grammar or the purchase order schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    Syntax,
    Schema,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::Syntax => f.write_str("syntax"),
            ValidationKind::Schema => f.write_str("schema"),
        }
    }
}

/// A problem found while parsing a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error at {path}: {message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    /// Location such as `/purchaseOrder/items/item[2]/quantity`.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    fn syntax(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            kind: ValidationKind::Syntax,
            path: path.into(),
            message: message.into(),
        }
    }

    fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            kind: ValidationKind::Schema,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ValidationKind::Syntax
    }

    pub fn is_schema(&self) -> bool {
        self.kind == ValidationKind::Schema
    }
}

/// A generic XML element. Text is kept verbatim, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    /// An element holding only text.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Element {
            text: text.into(),
            ..Element::new(name)
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Remove the attribute `name`, reporting whether it was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(key, _)| key != name);
        self.attributes.len() != before
    }

    /// Remove the first child named `name`, reporting whether there was one.
    pub fn remove_child(&mut self, name: &str) -> bool {
        match self.children.iter().position(|child| child.name == name) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Serialize a purchase order as indented XML. Never fails.
pub fn serialize(order: &PurchaseOrder) -> Vec<u8> {
    write(&to_element(order))
}

/// Parse and validate a purchase order document.
pub fn parse(bytes: &[u8]) -> Result<PurchaseOrder, Vec<ValidationError>> {
    let root = parse_tree(bytes).map_err(|error| {
        debug!(%error, "purchase order is not well-formed");
        vec![error]
    })?;

    let mut validator = Validator::default();
    let order = validator.purchase_order(&root);
    match order {
        Some(order) if validator.errors.is_empty() => Ok(order),
        _ => {
            if validator.errors.is_empty() {
                validator
                    .errors
                    .push(ValidationError::schema("/", "document does not match the schema"));
            }
            debug!(errors = validator.errors.len(), "purchase order failed validation");
            Err(validator.errors)
        }
    }
}

/// The element tree a purchase order is written as.
pub fn to_element(order: &PurchaseOrder) -> Element {
    let mut root = Element::new("purchaseOrder")
        .with_attribute("orderDate", order.order_date.format(DATE_FORMAT).to_string())
        .with_child(address_element("shipTo", &order.ship_to))
        .with_child(address_element("billTo", &order.bill_to));
    if let Some(comment) = &order.comment {
        root = root.with_child(Element::leaf("comment", comment.as_str()));
    }
    let items = order
        .items
        .iter()
        .fold(Element::new("items"), |items, item| items.with_child(item_element(item)));
    root.with_child(items)
}

fn address_element(name: &str, address: &UsAddress) -> Element {
    Element::new(name)
        .with_attribute("country", address.country.as_str())
        .with_child(Element::leaf("name", address.name.as_str()))
        .with_child(Element::leaf("street", address.street.as_str()))
        .with_child(Element::leaf("city", address.city.as_str()))
        .with_child(Element::leaf("state", address.state.as_str()))
        .with_child(Element::leaf("zip", address.zip.to_string()))
}

fn item_element(item: &Item) -> Element {
    let mut element = Element::new("item")
        .with_attribute("partNum", item.part_num.as_str())
        .with_child(Element::leaf("productName", item.product_name.as_str()))
        .with_child(Element::leaf("quantity", item.quantity.to_string()))
        .with_child(Element::leaf("USPrice", item.us_price.to_string()));
    if let Some(comment) = &item.comment {
        element = element.with_child(Element::leaf("comment", comment.as_str()));
    }
    if let Some(ship_date) = item.ship_date {
        element = element.with_child(Element::leaf(
            "shipDate",
            ship_date.format(DATE_FORMAT).to_string(),
        ));
    }
    element
}

/// Write an element tree as a document with an XML declaration, indenting
/// four spaces per level. Every element gets an explicit end tag.
pub fn write(root: &Element) -> Vec<u8> {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, root, 0);
    out.into_bytes()
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    out.push('>');

    if element.children.is_empty() {
        out.push_str(&escape(element.text.as_str()));
    } else {
        out.push('\n');
        for child in &element.children {
            write_element(out, child, depth + 1);
        }
        out.push_str(&indent);
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

/// Assemble a well-formed document into its element tree.
pub fn parse_tree(bytes: &[u8]) -> Result<Element, ValidationError> {
    let mut reader = Reader::from_reader(bytes);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|error| {
            ValidationError::syntax(path_of(&stack), format!("{error} (near byte {position})"))
        })?;

        match event {
            Event::Start(start) => {
                let element = open(&start, &stack)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open(&start, &stack)?;
                close(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                match stack.pop() {
                    Some(element) if element.name == name => close(element, &mut stack, &mut root)?,
                    Some(element) => {
                        return Err(ValidationError::syntax(
                            format!("{}/{}", path_of(&stack), element.name),
                            format!("end tag </{name}> does not match <{}>", element.name),
                        ))
                    }
                    None => {
                        return Err(ValidationError::syntax(
                            "/",
                            format!("end tag </{name}> has no start tag"),
                        ))
                    }
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|error| {
                    ValidationError::syntax(path_of(&stack), error.to_string())
                })?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(data) => append_text(&mut stack, &String::from_utf8_lossy(&data))?,
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(ValidationError::syntax(
            path_of(&stack),
            format!("element <{}> is never closed", unclosed.name),
        ));
    }
    root.ok_or_else(|| ValidationError::syntax("/", "document has no root element"))
}

fn path_of(stack: &[Element]) -> String {
    if stack.is_empty() {
        return "/".to_string();
    }
    stack.iter().fold(String::new(), |path, element| path + "/" + &element.name)
}

fn open(start: &BytesStart<'_>, stack: &[Element]) -> Result<Element, ValidationError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| {
            ValidationError::syntax(
                format!("{}/{}", path_of(stack), element.name),
                error.to_string(),
            )
        })?;
        let value = attribute.unescape_value().map_err(|error| {
            ValidationError::syntax(
                format!("{}/{}", path_of(stack), element.name),
                error.to_string(),
            )
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn close(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ValidationError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ValidationError::syntax(
            format!("/{}", element.name),
            "document has more than one root element",
        ));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), ValidationError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ValidationError::syntax("/", "text outside the root element")),
    }
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationError::schema(path, message));
    }

    fn purchase_order(&mut self, root: &Element) -> Option<PurchaseOrder> {
        let path = format!("/{}", root.name);
        if root.name != "purchaseOrder" {
            self.error(
                &path,
                format!("expected root element <purchaseOrder>, found <{}>", root.name),
            );
            return None;
        }

        self.allowed_attributes(root, &path, &["orderDate"]);
        self.element_only(root, &path);
        let order_date = self
            .attribute(root, &path, "orderDate")
            .and_then(|value| self.date(&format!("{path}/@orderDate"), value));

        let mut children = Sequence::new(root, &path);
        let ship_to = children
            .one(self, "shipTo")
            .and_then(|(path, child)| self.address(child, &path));
        let bill_to = children
            .one(self, "billTo")
            .and_then(|(path, child)| self.address(child, &path));
        let comment = match children.optional(self, "comment") {
            Some((path, child)) => self.text(child, &path).map(Some),
            None => Some(None),
        };
        let items = children
            .one(self, "items")
            .and_then(|(path, child)| self.items(child, &path));
        children.finish(self);

        Some(PurchaseOrder {
            order_date: order_date?,
            ship_to: ship_to?,
            bill_to: bill_to?,
            comment: comment?,
            items: items?,
        })
    }

    fn address(&mut self, element: &Element, path: &str) -> Option<UsAddress> {
        self.allowed_attributes(element, path, &["country"]);
        self.element_only(element, path);
        let country = self
            .attribute(element, path, "country")
            .and_then(|value| self.name_token(&format!("{path}/@country"), value));

        let mut children = Sequence::new(element, path);
        let mut field = |validator: &mut Self, name: &str| {
            children
                .one(validator, name)
                .and_then(|(path, child)| validator.text(child, &path).map(|text| (path, text)))
        };
        let name = field(self, "name");
        let street = field(self, "street");
        let city = field(self, "city");
        let state = field(self, "state");
        let zip = field(self, "zip").and_then(|(path, text)| {
            let parsed = text.trim().parse::<u32>();
            if parsed.is_err() {
                self.error(&path, format!("{text:?} is not a non-negative integer"));
            }
            parsed.ok()
        });
        children.finish(self);

        Some(UsAddress {
            country: country?,
            name: name?.1,
            street: street?.1,
            city: city?.1,
            state: state?.1,
            zip: zip?,
        })
    }

    fn items(&mut self, element: &Element, path: &str) -> Option<Vec<Item>> {
        self.allowed_attributes(element, path, &[]);
        self.element_only(element, path);
        let mut children = Sequence::new(element, path);
        let items: Vec<Option<Item>> = children
            .take(self, "item", 0, usize::MAX)
            .into_iter()
            .map(|(path, child)| self.item(child, &path))
            .collect();
        children.finish(self);
        items.into_iter().collect()
    }

    fn item(&mut self, element: &Element, path: &str) -> Option<Item> {
        self.allowed_attributes(element, path, &["partNum"]);
        self.element_only(element, path);
        let part_num = self
            .attribute(element, path, "partNum")
            .and_then(|value| {
                if PART_NUMBER.is_match(value) {
                    Some(value.to_string())
                } else {
                    self.error(
                        &format!("{path}/@partNum"),
                        format!("{value:?} is not a part number like 926-AA"),
                    );
                    None
                }
            });

        let mut children = Sequence::new(element, path);
        let product_name = children
            .one(self, "productName")
            .and_then(|(path, child)| self.text(child, &path));
        let quantity = children.one(self, "quantity").and_then(|(path, child)| {
            let text = self.text(child, &path)?;
            match text.trim().parse::<u8>() {
                Ok(quantity) if (1..100).contains(&quantity) => Some(quantity),
                _ => {
                    self.error(&path, format!("{text:?} is not a quantity between 1 and 99"));
                    None
                }
            }
        });
        let us_price = children.one(self, "USPrice").and_then(|(path, child)| {
            let text = self.text(child, &path)?;
            text.parse::<Price>()
                .map_err(|error| self.error(&path, error.to_string()))
                .ok()
        });
        let comment = match children.optional(self, "comment") {
            Some((path, child)) => self.text(child, &path).map(Some),
            None => Some(None),
        };
        let ship_date = match children.optional(self, "shipDate") {
            Some((path, child)) => self
                .text(child, &path)
                .and_then(|text| self.date(&path, &text))
                .map(Some),
            None => Some(None),
        };
        children.finish(self);

        Some(Item {
            part_num: part_num?,
            product_name: product_name?,
            quantity: quantity?,
            us_price: us_price?,
            comment: comment?,
            ship_date: ship_date?,
        })
    }

    fn attribute<'e>(&mut self, element: &'e Element, path: &str, name: &str) -> Option<&'e str> {
        let value = element.attribute(name);
        if value.is_none() {
            self.error(path, format!("missing attribute @{name}"));
        }
        value
    }

    fn allowed_attributes(&mut self, element: &Element, path: &str, allowed: &[&str]) {
        for (name, _) in &element.attributes {
            if !allowed.contains(&name.as_str()) {
                self.error(path, format!("unexpected attribute @{name}"));
            }
        }
    }

    /// Complex content may hold whitespace between elements but no text.
    fn element_only(&mut self, element: &Element, path: &str) {
        if !element.text.trim().is_empty() {
            self.error(path, format!("unexpected text in <{}>", element.name));
        }
    }

    fn text(&mut self, element: &Element, path: &str) -> Option<String> {
        self.allowed_attributes(element, path, &[]);
        if let Some(child) = element.children.first() {
            self.error(path, format!("unexpected element <{}> in text content", child.name));
            return None;
        }
        Some(element.text.clone())
    }

    fn date(&mut self, path: &str, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        match NaiveDate::parse_from_str(value, DATE_FORMAT) {
            Ok(date) if DATE.is_match(value) => Some(date),
            _ => {
                self.error(path, format!("{value:?} is not a date"));
                None
            }
        }
    }

    fn name_token(&mut self, path: &str, value: &str) -> Option<String> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'));
        if valid {
            Some(value.to_string())
        } else {
            self.error(path, format!("{value:?} is not a name token"));
            None
        }
    }
}

/// Walks the children of a complex element in schema order.
struct Sequence<'e> {
    children: &'e [Element],
    next: usize,
    path: String,
}

impl<'e> Sequence<'e> {
    fn new(element: &'e Element, path: &str) -> Self {
        Sequence {
            children: &element.children,
            next: 0,
            path: path.to_string(),
        }
    }

    /// Consume up to `max` consecutive children named `name`, reporting a
    /// missing element when fewer than `min` are found.
    fn take(
        &mut self,
        validator: &mut Validator,
        name: &str,
        min: usize,
        max: usize,
    ) -> Vec<(String, &'e Element)> {
        let mut taken = Vec::new();
        while taken.len() < max {
            match self.children.get(self.next) {
                Some(child) if child.name == name => {
                    taken.push(child);
                    self.next += 1;
                }
                _ => break,
            }
        }
        if taken.len() < min {
            validator.error(&self.path, format!("missing element <{name}>"));
        }

        let repeated = max > 1;
        taken
            .into_iter()
            .enumerate()
            .map(|(index, child)| {
                let path = if repeated {
                    format!("{}/{}[{}]", self.path, name, index + 1)
                } else {
                    format!("{}/{}", self.path, name)
                };
                (path, child)
            })
            .collect()
    }

    fn one(&mut self, validator: &mut Validator, name: &str) -> Option<(String, &'e Element)> {
        self.take(validator, name, 1, 1).into_iter().next()
    }

    fn optional(&mut self, validator: &mut Validator, name: &str) -> Option<(String, &'e Element)> {
        self.take(validator, name, 0, 1).into_iter().next()
    }

    /// Report every child left unconsumed.
    fn finish(self, validator: &mut Validator) {
        for child in &self.children[self.next..] {
            validator.error(
                &format!("{}/{}", self.path, child.name),
                format!("unexpected element <{}>", child.name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<purchaseOrder orderDate="1999-10-20">
    <shipTo country="US">
        <name>Alice Smith</name>
        <street>123 Maple Street</street>
        <city>Mill Valley</city>
        <state>CA</state>
        <zip>90952</zip>
    </shipTo>
    <billTo country="US">
        <name>Robert Smith</name>
        <street>8 Oak Avenue</street>
        <city>Old Town</city>
        <state>PA</state>
        <zip>95819</zip>
    </billTo>
    <comment>Hurry, my lawn is going wild!</comment>
    <items>
        <item partNum="872-AA">
            <productName>Lawnmower</productName>
            <quantity>1</quantity>
            <USPrice>148.95</USPrice>
            <comment>Confirm this is electric</comment>
        </item>
        <item partNum="926-AA">
            <productName>Baby Monitor</productName>
            <quantity>1</quantity>
            <USPrice>39.98</USPrice>
            <shipDate>1999-05-21</shipDate>
        </item>
    </items>
</purchaseOrder>
"#;

    fn sample() -> PurchaseOrder {
        parse(SAMPLE.as_bytes()).expect("sample document is valid")
    }

    fn errors_for(document: &str) -> Vec<ValidationError> {
        parse(document.as_bytes()).expect_err("document should be rejected")
    }

    #[test]
    fn test_parses_sample_document() {
        let order = sample();
        assert_eq!(order.order_date, NaiveDate::from_ymd_opt(1999, 10, 20).unwrap());
        assert_eq!(order.ship_to.name, "Alice Smith");
        assert_eq!(order.bill_to.zip, 95819);
        assert_eq!(order.comment.as_deref(), Some("Hurry, my lawn is going wild!"));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].us_price, Price::from_cents(14895));
        assert_eq!(order.items[0].ship_date, None);
        assert_eq!(
            order.items[1].ship_date,
            NaiveDate::from_ymd_opt(1999, 5, 21)
        );
    }

    #[test]
    fn test_serialize_then_parse_round_trips() {
        let mut order = sample();
        order.comment = Some("  <tags> & \"quotes\" 'too'\n".to_string());
        order.items[0].product_name = String::new();
        let bytes = serialize(&order);
        assert_eq!(parse(&bytes), Ok(order));
    }

    #[test]
    fn test_serialize_indents_four_spaces() {
        let text = String::from_utf8(serialize(&sample())).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<purchaseOrder"));
        assert!(text.contains("\n    <shipTo country=\"US\">\n        <name>Alice Smith</name>\n"));
        assert!(text.contains("\n            <quantity>1</quantity>\n"));
    }

    #[test]
    fn test_syntax_errors() {
        for document in [
            "",
            "<purchaseOrder>",
            "<a></b>",
            "</a>",
            "stray <a></a>",
            "<a></a><b></b>",
        ] {
            let errors = errors_for(document);
            assert_eq!(errors.len(), 1, "{document:?}");
            assert!(errors[0].is_syntax(), "{document:?}: {errors:?}");
        }
    }

    #[test]
    fn test_schema_errors_are_collected() {
        let document = SAMPLE
            .replace(" orderDate=\"1999-10-20\"", "")
            .replace("<quantity>1</quantity>", "<quantity>100</quantity>")
            .replace("872-AA", "87-AA");
        let errors = errors_for(&document);
        assert!(errors.iter().all(ValidationError::is_schema));
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"/purchaseOrder"));
        assert!(paths.contains(&"/purchaseOrder/items/item[1]/@partNum"));
        assert!(paths.contains(&"/purchaseOrder/items/item[1]/quantity"));
        assert!(paths.contains(&"/purchaseOrder/items/item[2]/quantity"));
    }

    #[test]
    fn test_dates_need_padded_fields() {
        for date in ["1999-1-2", "1999-01-2", "99-10-20", "1999-10-20T00:00"] {
            let document = SAMPLE.replace("1999-10-20", date);
            let errors = errors_for(&document);
            assert_eq!(errors.len(), 1, "{date}");
            assert!(errors[0].is_schema());
            assert_eq!(errors[0].path, "/purchaseOrder/@orderDate");
        }
        assert!(parse(SAMPLE.replace("1999-10-20", " 1999-10-20 ").as_bytes()).is_ok());
    }

    #[test]
    fn test_missing_and_unexpected_elements() {
        let errors = errors_for(&SAMPLE.replace("<state>CA</state>", ""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "/purchaseOrder/shipTo");
        assert!(errors[0].message.contains("<state>"));

        let errors = errors_for(&SAMPLE.replace("<zip>90952</zip>", "<zip>90952</zip><fax/>"));
        assert_eq!(errors[0].path, "/purchaseOrder/shipTo/fax");

        let errors = errors_for("<order></order>");
        assert!(errors[0].is_schema());
    }

    #[test]
    fn test_element_editing() {
        let mut root = to_element(&sample());
        assert!(root.remove_attribute("orderDate"));
        assert!(!root.remove_attribute("orderDate"));
        assert!(root.child_mut("shipTo").is_some_and(|ship_to| ship_to.remove_child("zip")));
        assert!(root.child("shipTo").unwrap().child("zip").is_none());
    }
}
