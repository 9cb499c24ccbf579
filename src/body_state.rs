use std::{cell::RefCell, rc::Rc};

use serde_json::json;

use crate::logging::{log_event, LogLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyProperty {
    Overflow,
    Cursor,
}

impl BodyProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::Cursor => "cursor",
        }
    }
}

pub trait StyleSink {
    fn apply(&self, property: BodyProperty, value: Option<&str>);
}

struct Claim {
    id: u64,
    owner: &'static str,
    values: Vec<(BodyProperty, String)>,
}

struct Inner {
    next_id: u64,
    stack: Vec<Claim>,
    sink: Box<dyn StyleSink>,
}

impl Inner {
    fn effective(&self, property: BodyProperty) -> Option<&str> {
        self.stack.iter().rev().find_map(|claim| {
            claim
                .values
                .iter()
                .find(|(claimed, _)| *claimed == property)
                .map(|(_, value)| value.as_str())
        })
    }

    fn reapply(&self, properties: &[BodyProperty]) {
        for property in properties {
            self.sink.apply(*property, self.effective(*property));
        }
    }
}

/// Owner of `document.body` styles shared by independent components.
///
/// Claims stack; the most recent claim on a property wins, and dropping a
/// claim restores whatever is underneath it.
#[derive(Clone)]
pub struct BodyStateService {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for BodyStateService {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl BodyStateService {
    pub fn new(sink: impl StyleSink + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                stack: Vec::new(),
                sink: Box::new(sink),
            })),
        }
    }

    pub fn acquire(&self, owner: &'static str, values: &[(BodyProperty, &str)]) -> BodyClaim {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.stack.push(Claim {
            id,
            owner,
            values: values
                .iter()
                .map(|(property, value)| (*property, value.to_string()))
                .collect(),
        });

        let properties: Vec<BodyProperty> = values.iter().map(|(property, _)| *property).collect();
        inner.reapply(&properties);
        log_event(
            LogLevel::Debug,
            "body_claim_acquired",
            json!({ "owner": owner, "depth": inner.stack.len() }),
        );

        BodyClaim {
            id,
            service: self.clone(),
        }
    }

    pub fn effective(&self, property: BodyProperty) -> Option<String> {
        self.inner.borrow().effective(property).map(str::to_string)
    }

    pub fn depth(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    fn release(&self, id: u64) {
        let mut inner = self.inner.borrow_mut();
        let Some(position) = inner.stack.iter().position(|claim| claim.id == id) else {
            return;
        };

        let claim = inner.stack.remove(position);
        let properties: Vec<BodyProperty> =
            claim.values.iter().map(|(property, _)| *property).collect();
        inner.reapply(&properties);
        log_event(
            LogLevel::Debug,
            "body_claim_released",
            json!({ "owner": claim.owner, "depth": inner.stack.len() }),
        );
    }
}

pub struct BodyClaim {
    id: u64,
    service: BodyStateService,
}

impl Drop for BodyClaim {
    fn drop(&mut self) {
        self.service.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Rc<RefCell<Vec<(BodyProperty, Option<String>)>>>,
    }

    impl StyleSink for RecordingSink {
        fn apply(&self, property: BodyProperty, value: Option<&str>) {
            self.writes
                .borrow_mut()
                .push((property, value.map(str::to_string)));
        }
    }

    impl RecordingSink {
        fn last(&self, property: BodyProperty) -> Option<Option<String>> {
            self.writes
                .borrow()
                .iter()
                .rev()
                .find(|(written, _)| *written == property)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn single_claim_is_cleared_on_drop() {
        let sink = RecordingSink::default();
        let body = BodyStateService::new(sink.clone());

        {
            let _menu = body.acquire("menu", &[(BodyProperty::Overflow, "hidden")]);
            assert_eq!(sink.last(BodyProperty::Overflow), Some(Some("hidden".to_string())));
        }

        assert_eq!(sink.last(BodyProperty::Overflow), Some(None));
        assert_eq!(body.depth(), 0);
    }

    #[test]
    fn menu_and_cursor_claims_compose() {
        let sink = RecordingSink::default();
        let body = BodyStateService::new(sink.clone());

        let cursor = body.acquire("custom-cursor", &[(BodyProperty::Cursor, "none")]);
        let menu = body.acquire(
            "menu",
            &[
                (BodyProperty::Overflow, "hidden"),
                (BodyProperty::Cursor, "default"),
            ],
        );
        assert_eq!(body.effective(BodyProperty::Cursor).as_deref(), Some("default"));

        drop(menu);
        assert_eq!(body.effective(BodyProperty::Cursor).as_deref(), Some("none"));
        assert_eq!(body.effective(BodyProperty::Overflow), None);
        assert_eq!(sink.last(BodyProperty::Cursor), Some(Some("none".to_string())));

        drop(cursor);
        assert_eq!(sink.last(BodyProperty::Cursor), Some(None));
    }

    #[test]
    fn releasing_a_buried_claim_keeps_the_top_value() {
        let sink = RecordingSink::default();
        let body = BodyStateService::new(sink.clone());

        let cursor = body.acquire("custom-cursor", &[(BodyProperty::Cursor, "none")]);
        let _menu = body.acquire("menu", &[(BodyProperty::Cursor, "default")]);

        drop(cursor);

        assert_eq!(body.effective(BodyProperty::Cursor).as_deref(), Some("default"));
        assert_eq!(sink.last(BodyProperty::Cursor), Some(Some("default".to_string())));
        assert_eq!(body.depth(), 1);
    }
}
