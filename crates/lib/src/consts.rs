//! Well-known module names and defaults shared across the planner.

/// Length of the truncated sha256 prefix used for plan hashes.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Runtime libraries forming the default boot classpath.
pub const DEFAULT_BOOTCLASSPATH_LIBRARIES: &[&str] = &["core-oj", "core-libart"];

/// Libraries every device module compiles against when no sdk version is set.
pub const DEFAULT_LIBRARIES: &[&str] = &["ext", "framework", "okhttp"];

/// Stub library for `sdk_version: "current"`.
pub const STUBS_CURRENT: &str = "android_stubs_current";

/// Stub library for `sdk_version: "test_current"`.
pub const STUBS_TEST_CURRENT: &str = "android_test_stubs_current";

/// Stub library for `sdk_version: "system_current"`.
pub const STUBS_SYSTEM_CURRENT: &str = "android_system_stubs_current";

/// Prefix of versioned sdk prebuilt modules (`sdk_v<version>`).
pub const SDK_MODULE_PREFIX: &str = "sdk_v";

/// The platform framework module, the only consumer of `framework-res` sources.
pub const FRAMEWORK_MODULE: &str = "framework";

/// The resource package whose generated source list `framework` compiles.
pub const FRAMEWORK_RES_MODULE: &str = "framework-res";

/// Conventional source subdirectory added to aidl include paths when present.
pub const LOCAL_SRC_DIR: &str = "src";

pub const DEFAULT_OUT_DIR: &str = "out/soong/.intermediates";
pub const DEFAULT_DEVICE_INSTALL_DIR: &str = "out/target/product/generic/system";
pub const DEFAULT_HOST_INSTALL_DIR: &str = "out/host/linux-x86";
pub const DEFAULT_JAVA_VERSION: &str = "1.8";
pub const DEFAULT_APP_TARGET_SDK: u32 = 25;
