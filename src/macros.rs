/**
 A helper macro to read a field of a `dirent64` (linux/android) or `dirent` (macos) record.

 # Safety
 - The caller must ensure that the pointer is valid and points to a 'dirent-type' struct.
 - The macro must be expanded inside an `unsafe` context.

 # Usage
 ```ignore
 let entry_ptr: *const dirent64 = ...; // a record returned by readdir
 let d_ino: u64 = access_dirent!(entry_ptr, d_ino);
 let d_type: u8 = access_dirent!(entry_ptr, d_type);
 let d_reclen: usize = access_dirent!(entry_ptr, d_reclen);
 let d_name: *const u8 = access_dirent!(entry_ptr, d_name);
 ```
*/
#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
macro_rules! access_dirent {
    ($entry_ptr:expr, d_reclen) => {{ (*$entry_ptr).d_reclen as usize }};

    // inode number, normalised to u64
    ($entry_ptr:expr, d_ino) => {{ (*$entry_ptr).d_ino as u64 }};

    ($entry_ptr:expr, d_type) => {{ (*$entry_ptr).d_type as u8 }};

    // pointer to the start of the fixed capacity name buffer
    ($entry_ptr:expr, d_name) => {{ (*$entry_ptr).d_name.as_ptr().cast::<u8>() }};
}

/// Compile time assertion, similar to a `static_assert` from c++
macro_rules! const_assert {
    ($cond:expr $(,)?) => {
        const _: () = {
            if !$cond {
                panic!(concat!("const assertion failed: ", stringify!($cond)));
            }
        };
    };
    ($cond:expr, $($arg:tt)+) => {
        const _: () = {
            if !$cond {
                panic!($($arg)+);
            }
        };
    };
}

/**
 Skips "." and ".." names.

 Checks the length first so that the byte comparison only runs for names of one or two
 bytes, which keeps the common path down to a single predictable branch.
*/
macro_rules! skip_dot_or_dot_dot_entries {
    ($name:expr, $action:expr) => {{
        let name: &[u8] = $name;
        if name.len() <= 2 && matches!(name, b"." | b"..") {
            $action;
        }
    }};
}
