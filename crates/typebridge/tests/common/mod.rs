// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Test doubles shared by the integration tests.
//!
//! `MockBackend` serves a small catalog and runs text/int4 routines.
//! `MockRuntime` models a managed heap with reference accounting so tests can
//! assert that nothing leaks.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::num::NonZeroU64;
use typebridge::{
    Backend, BackendError, CatalogEntry, Datum, Encoding, GlobalRef, LocalRef, ManagedRuntime,
    MethodId, Oid, RoutineHandle, Utf8Chars,
};

pub const INT4: Oid = Oid(23);
pub const UNKNOWN_TYPE: Oid = Oid(99_999);

const TEXTIN: Oid = Oid(46);
const TEXTOUT: Oid = Oid(47);
const INT4IN: Oid = Oid(42);
const INT4OUT: Oid = Oid(43);

// ============================================================================
// Database side
// ============================================================================

pub struct MockBackend {
    pub encoding: Encoding,
    catalog: HashMap<Oid, CatalogEntry>,
    lookups: Cell<usize>,
    pub output_calls: usize,
    pub input_calls: usize,
    pub fail_output: bool,
    pub fail_input: bool,
    /// Text handed to the most recent input routine call.
    pub last_input: Option<Vec<u8>>,
}

impl MockBackend {
    pub fn new(encoding: Encoding) -> Self {
        let mut catalog = HashMap::new();
        for (type_id, name) in [
            (Oid::TEXT, "text"),
            (Oid::VARCHAR, "varchar"),
            (Oid::BPCHAR, "bpchar"),
            (Oid::NAME, "name"),
            (Oid::CSTRING, "cstring"),
        ] {
            catalog.insert(type_id, entry(type_id, name, TEXTOUT, TEXTIN));
        }
        catalog.insert(INT4, entry(INT4, "int4", INT4OUT, INT4IN));

        Self {
            encoding,
            catalog,
            lookups: Cell::new(0),
            output_calls: 0,
            input_calls: 0,
            fail_output: false,
            fail_input: false,
            last_input: None,
        }
    }

    pub fn utf8() -> Self {
        Self::new(Encoding::Utf8)
    }

    /// Catalog reads so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    pub fn catalog_entry(&self, type_id: Oid) -> CatalogEntry {
        self.catalog[&type_id].clone()
    }
}

fn entry(type_id: Oid, name: &str, output: Oid, input: Oid) -> CatalogEntry {
    CatalogEntry {
        type_id,
        name: name.to_string(),
        output_routine: RoutineHandle(output),
        input_routine: RoutineHandle(input),
        element_type: Oid::INVALID,
    }
}

impl Backend for MockBackend {
    fn database_encoding(&self) -> Encoding {
        self.encoding
    }

    fn lookup_type(&self, type_id: Oid) -> Result<CatalogEntry, BackendError> {
        self.lookups.set(self.lookups.get() + 1);
        self.catalog.get(&type_id).cloned().ok_or_else(|| {
            BackendError::new(format!("type {} does not exist", type_id)).with_sqlstate("42704")
        })
    }

    fn call_output(
        &mut self,
        routine: RoutineHandle,
        value: &Datum,
        _element_type: Oid,
        typmod: i32,
    ) -> Result<CString, BackendError> {
        self.output_calls += 1;
        assert_eq!(typmod, -1);
        if self.fail_output {
            return Err(BackendError::new("output routine failed"));
        }
        let text = match (routine.oid(), value.as_word(), value.as_bytes()) {
            (INT4OUT, Some(word), _) => (word as i32).to_string().into_bytes(),
            (TEXTOUT, _, Some(bytes)) => bytes.to_vec(),
            _ => return Err(BackendError::new("datum does not match routine")),
        };
        CString::new(text).map_err(|_| BackendError::new("NUL in text"))
    }

    fn call_input(
        &mut self,
        routine: RoutineHandle,
        text: &CStr,
        _element_type: Oid,
        typmod: i32,
    ) -> Result<Datum, BackendError> {
        self.input_calls += 1;
        assert_eq!(typmod, -1);
        self.last_input = Some(text.to_bytes().to_vec());
        if self.fail_input {
            return Err(BackendError::new("input routine failed"));
        }
        match routine.oid() {
            INT4IN => {
                let parsed = text
                    .to_str()
                    .ok()
                    .and_then(|s| s.parse::<i32>().ok())
                    .ok_or_else(|| {
                        BackendError::new("invalid input syntax for type integer")
                            .with_sqlstate("22P02")
                    })?;
                Ok(Datum::from_word(parsed as u32 as u64))
            }
            TEXTIN => Ok(Datum::from_bytes(text.to_bytes())),
            _ => Err(BackendError::new("unknown input routine")),
        }
    }
}

/// Pass-by-reference text datum.
pub fn text_datum(bytes: &[u8]) -> Datum {
    Datum::from_bytes(bytes)
}

// ============================================================================
// Managed side
// ============================================================================

/// How a plain object answers `toString`.
#[derive(Debug, Clone)]
pub enum OnToString {
    Returns(String),
    Null,
    Throws,
    /// Raises an exception but still hands back a reference.
    ThrowsWithResult(String),
}

#[derive(Debug, Clone)]
enum Object {
    Class(String),
    Str(CString),
    Plain(OnToString),
}

const TO_STRING_ID: u64 = 7;

pub struct MockRuntime {
    heap: HashMap<u64, Object>,
    locals: HashMap<u64, u64>,
    globals: HashMap<u64, u64>,
    next_id: u64,
    pending_exception: bool,
    pinned: HashMap<u64, u64>,
    pub missing_classes: Vec<&'static str>,
    pub fail_string_creation: bool,
    pub to_string_calls: usize,
    /// Bytes handed to the most recent `new_string_utf` call.
    pub last_new_string: Option<Vec<u8>>,
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            heap: HashMap::new(),
            locals: HashMap::new(),
            globals: HashMap::new(),
            next_id: 1,
            pending_exception: false,
            pinned: HashMap::new(),
            missing_classes: Vec::new(),
            fail_string_creation: false,
            to_string_calls: 0,
            last_new_string: None,
        }
    }

    pub fn live_locals(&self) -> usize {
        self.locals.len()
    }

    pub fn live_globals(&self) -> usize {
        self.globals.len()
    }

    pub fn pinned_chars(&self) -> usize {
        self.pinned.len()
    }

    pub fn exception_pending(&self) -> bool {
        self.pending_exception
    }

    pub fn clear_exception(&mut self) {
        self.pending_exception = false;
    }

    /// New managed string held by a fresh local reference.
    pub fn string(&mut self, value: &str) -> LocalRef {
        let object = self.alloc(Object::Str(CString::new(value).unwrap()));
        self.local(object)
    }

    /// New non-string object held by a fresh local reference.
    pub fn object(&mut self, behavior: OnToString) -> LocalRef {
        let object = self.alloc(Object::Plain(behavior));
        self.local(object)
    }

    /// UTF-8 content of a managed string.
    pub fn string_value(&self, string: &LocalRef) -> Option<String> {
        match self.deref_local(string) {
            Some(Object::Str(s)) => Some(s.to_str().unwrap().to_string()),
            _ => None,
        }
    }

    fn alloc(&mut self, object: Object) -> u64 {
        let id = self.fresh_id();
        self.heap.insert(id, object);
        id
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn local(&mut self, object: u64) -> LocalRef {
        let handle = self.fresh_id();
        self.locals.insert(handle, object);
        LocalRef::from_raw(NonZeroU64::new(handle).unwrap())
    }

    fn deref_local(&self, local: &LocalRef) -> Option<&Object> {
        let object = self.locals.get(&local.as_raw().get())?;
        self.heap.get(object)
    }

    fn deref_global(&self, global: &GlobalRef) -> Option<&Object> {
        let object = self.globals.get(&global.as_raw().get())?;
        self.heap.get(object)
    }
}

impl ManagedRuntime for MockRuntime {
    fn find_class(&mut self, name: &str) -> Option<LocalRef> {
        if self.missing_classes.iter().any(|missing| *missing == name) {
            self.pending_exception = true;
            return None;
        }
        let class = self.alloc(Object::Class(name.to_string()));
        Some(self.local(class))
    }

    fn get_method_id(
        &mut self,
        class: &GlobalRef,
        name: &str,
        signature: &str,
    ) -> Option<MethodId> {
        let is_object = matches!(
            self.deref_global(class),
            Some(Object::Class(c)) if c == "java/lang/Object"
        );
        if is_object && name == "toString" && signature == "()Ljava/lang/String;" {
            return NonZeroU64::new(TO_STRING_ID).map(MethodId::from_raw);
        }
        self.pending_exception = true;
        None
    }

    fn new_global_ref(&mut self, object: &LocalRef) -> Option<GlobalRef> {
        let target = *self.locals.get(&object.as_raw().get())?;
        let handle = self.fresh_id();
        self.globals.insert(handle, target);
        NonZeroU64::new(handle).map(GlobalRef::from_raw)
    }

    fn delete_global_ref(&mut self, global: GlobalRef) {
        assert!(
            self.globals.remove(&global.as_raw().get()).is_some(),
            "deleting unknown global ref"
        );
    }

    fn delete_local_ref(&mut self, local: LocalRef) {
        assert!(
            self.locals.remove(&local.as_raw().get()).is_some(),
            "deleting unknown local ref"
        );
    }

    fn is_instance_of(&mut self, object: &LocalRef, class: &GlobalRef) -> bool {
        let class_name = match self.deref_global(class) {
            Some(Object::Class(name)) => name.clone(),
            _ => return false,
        };
        match (class_name.as_str(), self.deref_local(object)) {
            ("java/lang/Object", Some(_)) => true,
            ("java/lang/String", Some(Object::Str(_))) => true,
            _ => false,
        }
    }

    fn call_object_method(&mut self, object: &LocalRef, method: MethodId) -> Option<LocalRef> {
        assert_eq!(method.as_raw().get(), TO_STRING_ID);
        assert!(!self.pending_exception, "call with exception pending");
        self.to_string_calls += 1;
        match self.deref_local(object)?.clone() {
            Object::Str(s) => {
                let copy = self.alloc(Object::Str(s));
                Some(self.local(copy))
            }
            Object::Class(name) => Some(self.string(&name)),
            Object::Plain(OnToString::Returns(s)) => Some(self.string(&s)),
            Object::Plain(OnToString::Null) => None,
            Object::Plain(OnToString::Throws) => {
                self.pending_exception = true;
                None
            }
            Object::Plain(OnToString::ThrowsWithResult(s)) => {
                self.pending_exception = true;
                Some(self.string(&s))
            }
        }
    }

    fn exception_check(&mut self) -> bool {
        self.pending_exception
    }

    fn new_string_utf(&mut self, utf8: &CStr) -> Option<LocalRef> {
        self.last_new_string = Some(utf8.to_bytes().to_vec());
        if self.fail_string_creation || std::str::from_utf8(utf8.to_bytes()).is_err() {
            self.pending_exception = true;
            return None;
        }
        let string = self.alloc(Object::Str(utf8.to_owned()));
        Some(self.local(string))
    }

    fn get_string_utf_chars(&mut self, string: &LocalRef) -> Option<Utf8Chars> {
        let chars = match self.deref_local(string) {
            Some(Object::Str(s)) => s.clone(),
            _ => return None,
        };
        let token = self.fresh_id();
        self.pinned.insert(token, string.as_raw().get());
        Some(Utf8Chars::new(token, chars))
    }

    fn release_string_utf_chars(&mut self, string: &LocalRef, chars: Utf8Chars) {
        let owner = self.pinned.remove(&chars.token());
        assert_eq!(
            owner,
            Some(string.as_raw().get()),
            "chars released twice or to wrong string"
        );
    }
}
