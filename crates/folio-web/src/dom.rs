use folio_core::layer::Surface;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlElement,
  HtmlInputElement,
  HtmlTextAreaElement,
  NodeList
};
use yew::{
  AppHandle,
  BaseComponent
};

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

fn collect(list: NodeList) -> Vec<Element> {
  (0..list.length())
    .filter_map(|i| list.item(i))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// All matches in the document; an invalid
/// selector matches nothing.
pub fn query_all(
  document: &Document,
  selector: &str
) -> Vec<Element> {
  document
    .query_selector_all(selector)
    .map(collect)
    .unwrap_or_default()
}

pub fn query_all_in(
  root: &Element,
  selector: &str
) -> Vec<Element> {
  root
    .query_selector_all(selector)
    .map(collect)
    .unwrap_or_default()
}

pub fn query(
  document: &Document,
  selector: &str
) -> Option<Element> {
  document
    .query_selector(selector)
    .ok()
    .flatten()
}

pub fn query_in(
  root: &Element,
  selector: &str
) -> Option<Element> {
  root.query_selector(selector).ok().flatten()
}

pub fn text_of(element: &Element) -> String {
  element.text_content().unwrap_or_default()
}

/// Text of the first match under `root`,
/// empty when there is none.
pub fn text_in(
  root: &Element,
  selector: &str
) -> String {
  query_in(root, selector)
    .map(|el| text_of(&el))
    .unwrap_or_default()
}

pub fn set_styles(
  element: &Element,
  styles: &[(&str, &str)]
) {
  if let Some(html) =
    element.dyn_ref::<HtmlElement>()
  {
    let style = html.style();
    for (name, value) in styles {
      let _ = style.set_property(name, value);
    }
  }
}

pub fn style_value(
  element: &Element,
  name: &str
) -> String {
  element
    .dyn_ref::<HtmlElement>()
    .and_then(|html| {
      html.style().get_property_value(name).ok()
    })
    .unwrap_or_default()
}

pub fn create(
  document: &Document,
  tag: &str,
  class: &str
) -> Option<Element> {
  let element =
    document.create_element(tag).ok()?;
  if !class.is_empty() {
    element.set_class_name(class);
  }
  Some(element)
}

pub fn append_to_body(
  document: &Document,
  element: &Element
) -> bool {
  document
    .body()
    .is_some_and(|body| {
      body.append_child(element).is_ok()
    })
}

pub fn focus(element: &Element) {
  if let Some(html) =
    element.dyn_ref::<HtmlElement>()
  {
    let _ = html.focus();
  }
}

/// Fires the element's own click handlers.
pub fn click(element: &Element) {
  if let Some(html) =
    element.dyn_ref::<HtmlElement>()
  {
    html.click();
  }
}

pub fn set_visible(
  element: &Element,
  visible: bool,
  animation: &str
) {
  if visible {
    set_styles(
      element,
      &[
        ("display", "block"),
        ("animation", animation)
      ]
    );
  } else {
    set_styles(element, &[("display", "none")]);
  }
}

pub fn set_class(
  element: &Element,
  class: &str,
  on: bool
) {
  let list = element.class_list();
  let _ = if on {
    list.add_1(class)
  } else {
    list.remove_1(class)
  };
}

/// `event.target` as an element.
pub fn event_target(
  event: &web_sys::Event
) -> Option<Element> {
  event
    .target()
    .and_then(|target| {
      target.dyn_into::<Element>().ok()
    })
}

/// Current value of an `<input>` or
/// `<textarea>`.
pub fn input_value(element: &Element) -> String {
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    return input.value();
  }
  element
    .dyn_ref::<HtmlTextAreaElement>()
    .map(HtmlTextAreaElement::value)
    .unwrap_or_default()
}

pub fn set_input_value(
  element: &Element,
  value: &str
) {
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    input.set_value(value);
  } else if let Some(area) =
    element.dyn_ref::<HtmlTextAreaElement>()
  {
    area.set_value(value);
  }
}

pub fn remove_all(
  root: &Element,
  selector: &str
) {
  for element in query_all_in(root, selector) {
    element.remove();
  }
}

/// A Yew app mounted once on its own
/// host and updated through its props.
pub struct YewSurface<C: BaseComponent> {
  app: AppHandle<C>
}

impl<C: BaseComponent> YewSurface<C> {
  /// Appends a `class` host to the body
  /// and renders `C` into it.
  pub fn mount(
    document: &Document,
    class: &str,
    props: C::Properties
  ) -> Option<Self> {
    let host = create(document, "div", class)?;
    if !append_to_body(document, &host) {
      return None;
    }
    let app =
      yew::Renderer::<C>::with_root_and_props(
        host, props
      )
      .render();
    Some(Self {
      app
    })
  }
}

impl<C: BaseComponent> Surface for YewSurface<C> {
  type Props = C::Properties;

  fn render(&mut self, props: C::Properties) {
    self.app.update(props);
  }
}
