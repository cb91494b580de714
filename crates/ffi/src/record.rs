//! The exported record and its owning Rust-side wrapper

use crate::alloc::{copy_c_str, try_box};
use go_struct_core::{Error, Result, STRUCT_NAME};
use libc::c_char;
use std::ffi::{CStr, CString};
use std::ptr;

/// C view of a record: `{ const char* name; int32_t age; }`
///
/// A `MyGoStruct` produced by this library owns its `name` buffer. The
/// pointer is declared const for C callers, who must not write through it.
#[repr(C)]
#[derive(Debug)]
pub struct MyGoStruct {
    pub name: *const c_char,
    pub age: i32,
}

impl MyGoStruct {
    /// Borrows the name, or `None` when the field is null.
    ///
    /// # Safety
    /// `name` must be null or point to a NUL-terminated buffer that outlives
    /// the returned reference.
    pub unsafe fn name(&self) -> Option<&CStr> {
        if self.name.is_null() {
            None
        } else {
            // SAFETY: guaranteed by the caller.
            Some(unsafe { CStr::from_ptr(self.name) })
        }
    }

    /// Replaces the name with a copy of `name`, releasing the old buffer
    /// only once the copy exists. On error the record is unchanged.
    ///
    /// # Safety
    /// `self.name` must be null or a buffer allocated by this library.
    pub unsafe fn replace_name(&mut self, name: &CStr) -> Result<()> {
        let copy = copy_c_str(name)?;
        let old = std::mem::replace(&mut self.name, copy.into_raw().cast_const());
        if !old.is_null() {
            // SAFETY: old was produced by CString::into_raw in this library.
            drop(unsafe { CString::from_raw(old.cast_mut()) });
        }
        Ok(())
    }
}

/// Owned record. Dropping it releases the name buffer.
///
/// This is the scoped form used inside the library; [`Record::into_raw`]
/// and [`Record::from_raw`] move ownership across the C boundary.
#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    name: Option<CString>,
    age: i32,
}

impl Record {
    /// Builds a record holding its own copy of `name`.
    pub fn new(name: &CStr, age: i32) -> Result<Self> {
        Ok(Self {
            name: Some(copy_c_str(name)?),
            age,
        })
    }

    /// Builds a record from Rust text, rejecting interior NUL bytes.
    pub fn from_text(name: &str, age: i32) -> Result<Self> {
        let name = CString::new(name)
            .map_err(|e| Error::interior_nul("Record::from_text", e.nul_position()))?;
        Ok(Self {
            name: Some(name),
            age,
        })
    }

    pub fn name(&self) -> Option<&CStr> {
        self.name.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    /// Replaces the name with a copy of `name`; unchanged on error.
    pub fn set_name(&mut self, name: &CStr) -> Result<()> {
        self.name = Some(copy_c_str(name)?);
        Ok(())
    }

    /// Hands the record to a C caller, who must release it with
    /// `free_go_struct` exactly once.
    ///
    /// If the record block cannot be allocated the name buffer is released
    /// before the error is returned.
    pub fn into_raw(self) -> Result<*mut MyGoStruct> {
        let Record { name, age } = self;

        let block = try_box(
            MyGoStruct {
                name: ptr::null(),
                age,
            },
            STRUCT_NAME,
        )?;

        if let Some(name) = name {
            // SAFETY: block was just allocated and initialised by try_box.
            unsafe { (*block.as_ptr()).name = name.into_raw().cast_const() };
        }
        Ok(block.as_ptr())
    }

    /// Takes ownership back from a C caller. Null yields `None`.
    ///
    /// # Safety
    /// `raw` must be null or a pointer returned by [`Record::into_raw`] that
    /// has not been released yet. It must not be used afterwards.
    pub unsafe fn from_raw(raw: *mut MyGoStruct) -> Option<Self> {
        if raw.is_null() {
            return None;
        }

        // SAFETY: raw came from try_box, whose layout matches Box<MyGoStruct>.
        let block = unsafe { Box::from_raw(raw) };
        let name = if block.name.is_null() {
            None
        } else {
            // SAFETY: a non-null name was produced by CString::into_raw.
            Some(unsafe { CString::from_raw(block.name.cast_mut()) })
        };

        Some(Self {
            name,
            age: block.age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip_preserves_fields() {
        let raw = Record::new(c"Alice", 30).unwrap().into_raw().unwrap();

        // SAFETY: raw is a live record from into_raw.
        let view = unsafe { &*raw };
        assert_eq!(view.age, 30);
        assert_eq!(unsafe { view.name() }, Some(c"Alice"));

        // SAFETY: released exactly once.
        let back = unsafe { Record::from_raw(raw) }.unwrap();
        assert_eq!(back.name(), Some(c"Alice"));
        assert_eq!(back.age(), 30);
    }

    #[test]
    fn test_from_raw_null_is_none() {
        // SAFETY: null is explicitly allowed.
        assert!(unsafe { Record::from_raw(ptr::null_mut()) }.is_none());
    }

    #[test]
    fn test_from_raw_tolerates_null_name() {
        let raw = try_box(
            MyGoStruct {
                name: ptr::null(),
                age: 7,
            },
            STRUCT_NAME,
        )
        .unwrap()
        .as_ptr();

        // SAFETY: raw came from try_box and has a null name.
        let record = unsafe { Record::from_raw(raw) }.unwrap();
        assert_eq!(record.name(), None);
        assert_eq!(record.age(), 7);
    }

    #[test]
    fn test_from_text_rejects_interior_nul() {
        let err = Record::from_text("Al\0ice", 1).unwrap_err();
        assert!(matches!(err, Error::InteriorNul { position: 2, .. }));
    }

    #[test]
    fn test_replace_name_on_c_view() {
        let raw = Record::from_text("Bob", 40).unwrap().into_raw().unwrap();

        // SAFETY: raw is live and its name was allocated by this library.
        unsafe {
            (*raw).replace_name(c"Robert").unwrap();
            assert_eq!((*raw).name(), Some(c"Robert"));
            drop(Record::from_raw(raw));
        }
    }

    #[test]
    fn test_setters() {
        let mut record = Record::from_text("Carol", 1).unwrap();
        record.set_age(-5);
        record.set_name(c"Caroline").unwrap();
        assert_eq!(record.age(), -5);
        assert_eq!(record.name(), Some(c"Caroline"));
    }
}
