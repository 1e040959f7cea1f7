use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::Target;

/// The registered module types a blueprint may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
  JavaDefaults,
  JavaLibrary,
  JavaLibraryStatic,
  JavaLibraryHost,
  JavaBinary,
  JavaBinaryHost,
  JavaImport,
  JavaImportHost,
  AndroidPrebuiltSdk,
}

/// The variant family a module type plans as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
  Library,
  Binary,
  Import,
  SdkPrebuilt,
  Defaults,
}

impl ModuleType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::JavaDefaults => "java_defaults",
      Self::JavaLibrary => "java_library",
      Self::JavaLibraryStatic => "java_library_static",
      Self::JavaLibraryHost => "java_library_host",
      Self::JavaBinary => "java_binary",
      Self::JavaBinaryHost => "java_binary_host",
      Self::JavaImport => "java_import",
      Self::JavaImportHost => "java_import_host",
      Self::AndroidPrebuiltSdk => "android_prebuilt_sdk",
    }
  }

  pub fn variant_kind(&self) -> VariantKind {
    match self {
      Self::JavaDefaults => VariantKind::Defaults,
      Self::JavaLibrary | Self::JavaLibraryStatic | Self::JavaLibraryHost => VariantKind::Library,
      Self::JavaBinary | Self::JavaBinaryHost => VariantKind::Binary,
      Self::JavaImport | Self::JavaImportHost => VariantKind::Import,
      Self::AndroidPrebuiltSdk => VariantKind::SdkPrebuilt,
    }
  }

  /// Whether this type only ever builds for the host.
  pub fn is_host_only(&self) -> bool {
    matches!(self, Self::JavaLibraryHost | Self::JavaBinaryHost | Self::JavaImportHost)
  }

  /// Targets this module type is planned for.
  ///
  /// Host-only types yield just the host; defaults exist for both targets so
  /// any variant can name them; everything else always has a device variant
  /// and gains a host variant when `host_supported` is set.
  pub fn targets(&self, host_supported: bool) -> Vec<Target> {
    if self.is_host_only() {
      vec![Target::Host]
    } else if *self == Self::JavaDefaults || host_supported {
      Target::ALL.to_vec()
    } else {
      vec![Target::Device]
    }
  }

  /// Whether the type's factory enables dexing. Host variants of these types
  /// keep it, which is how host test builds of device libraries get dexed.
  pub fn dex_by_default(&self) -> bool {
    matches!(self, Self::JavaLibrary | Self::JavaLibraryStatic | Self::JavaBinary)
  }
}

impl fmt::Display for ModuleType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl fmt::Display for VariantKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Library => "library",
      Self::Binary => "binary",
      Self::Import => "import",
      Self::SdkPrebuilt => "sdk_prebuilt",
      Self::Defaults => "defaults",
    };
    write!(f, "{}", s)
  }
}

/// Properties shared by every compilable module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerProperties {
  /// Source files or patterns; `:name` entries reference generated sources.
  pub srcs: Vec<String>,
  pub exclude_srcs: Vec<String>,
  /// Directories whose contents are packaged as java resources.
  pub resource_dirs: Vec<String>,
  pub exclude_resource_dirs: Vec<String>,
  /// Don't build against the default boot classpath and libraries.
  pub no_standard_libs: Option<bool>,
  pub javacflags: Vec<String>,
  /// Libraries on the classpath.
  pub libs: Vec<String>,
  /// Libraries on the classpath and merged into this module's jar.
  pub static_libs: Vec<String>,
  /// Manifest file included in the resulting jar.
  pub manifest: Option<String>,
  /// If set, rewrite the combined jar with these jarjar rules.
  pub jarjar_rules: Option<String>,
  /// Passed to javac as `-source`/`-target`.
  pub java_version: Option<String>,
  /// Defaults to true.
  pub installable: Option<bool>,
  /// File lists of extra sources passed straight to javac.
  pub extra_src_lists: Vec<String>,
}

/// Properties that only matter when compiling for the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProperties {
  pub dxflags: Vec<String>,
  /// Sdk to compile against: unset, `current`, `test_current`,
  /// `system_current`, or a numeric version.
  pub sdk_version: Option<String>,
  /// Directories passed to the aidl tool.
  pub aidl_includes: Vec<String>,
  /// Aidl include directories exported to dependents.
  pub export_aidl_include_dirs: Vec<String>,
  /// Set by the module factory, never by the blueprint.
  #[serde(skip)]
  pub dex: bool,
}

impl CompilerProperties {
  pub fn no_standard_libs(&self) -> bool {
    self.no_standard_libs.unwrap_or(false)
  }

  pub fn installable(&self) -> bool {
    self.installable.unwrap_or(true)
  }

  /// Layer `defaults` underneath these properties: lists become
  /// `defaults ++ self`, unset scalars fall back to the defaults' value.
  pub fn prepend(&mut self, defaults: &CompilerProperties) {
    prepend_list(&mut self.srcs, &defaults.srcs);
    prepend_list(&mut self.exclude_srcs, &defaults.exclude_srcs);
    prepend_list(&mut self.resource_dirs, &defaults.resource_dirs);
    prepend_list(&mut self.exclude_resource_dirs, &defaults.exclude_resource_dirs);
    prepend_list(&mut self.javacflags, &defaults.javacflags);
    prepend_list(&mut self.libs, &defaults.libs);
    prepend_list(&mut self.static_libs, &defaults.static_libs);
    prepend_list(&mut self.extra_src_lists, &defaults.extra_src_lists);
    fallback(&mut self.no_standard_libs, &defaults.no_standard_libs);
    fallback(&mut self.manifest, &defaults.manifest);
    fallback(&mut self.jarjar_rules, &defaults.jarjar_rules);
    fallback(&mut self.java_version, &defaults.java_version);
    fallback(&mut self.installable, &defaults.installable);
  }

  /// Layer `later` on top of these defaults: lists become `self ++ later`,
  /// scalars already set here are kept.
  pub fn append(&mut self, later: &CompilerProperties) {
    self.srcs.extend_from_slice(&later.srcs);
    self.exclude_srcs.extend_from_slice(&later.exclude_srcs);
    self.resource_dirs.extend_from_slice(&later.resource_dirs);
    self.exclude_resource_dirs.extend_from_slice(&later.exclude_resource_dirs);
    self.javacflags.extend_from_slice(&later.javacflags);
    self.libs.extend_from_slice(&later.libs);
    self.static_libs.extend_from_slice(&later.static_libs);
    self.extra_src_lists.extend_from_slice(&later.extra_src_lists);
    fallback(&mut self.no_standard_libs, &later.no_standard_libs);
    fallback(&mut self.manifest, &later.manifest);
    fallback(&mut self.jarjar_rules, &later.jarjar_rules);
    fallback(&mut self.java_version, &later.java_version);
    fallback(&mut self.installable, &later.installable);
  }
}

impl DeviceProperties {
  /// The sdk version, with unset reported as the empty string.
  pub fn sdk_version(&self) -> &str {
    self.sdk_version.as_deref().unwrap_or("")
  }

  pub fn prepend(&mut self, defaults: &DeviceProperties) {
    prepend_list(&mut self.dxflags, &defaults.dxflags);
    prepend_list(&mut self.aidl_includes, &defaults.aidl_includes);
    prepend_list(&mut self.export_aidl_include_dirs, &defaults.export_aidl_include_dirs);
    fallback(&mut self.sdk_version, &defaults.sdk_version);
  }

  pub fn append(&mut self, later: &DeviceProperties) {
    self.dxflags.extend_from_slice(&later.dxflags);
    self.aidl_includes.extend_from_slice(&later.aidl_includes);
    self.export_aidl_include_dirs.extend_from_slice(&later.export_aidl_include_dirs);
    fallback(&mut self.sdk_version, &later.sdk_version);
  }
}

fn prepend_list(list: &mut Vec<String>, defaults: &[String]) {
  if defaults.is_empty() {
    return;
  }
  let mut merged = defaults.to_vec();
  merged.append(list);
  *list = merged;
}

fn fallback<T: Clone>(value: &mut Option<T>, default: &Option<T>) {
  if value.is_none() {
    *value = default.clone();
  }
}

/// One module declaration in a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDecl {
  #[serde(rename = "type")]
  pub module_type: ModuleType,
  pub name: String,
  /// Directory of the module, relative to the source root.
  #[serde(default)]
  pub dir: PathBuf,
  /// Defaults modules whose properties this module inherits.
  #[serde(default)]
  pub defaults: Vec<String>,
  /// Also build a host variant of a device module type.
  #[serde(default)]
  pub host_supported: bool,
  #[serde(flatten)]
  pub compiler: CompilerProperties,
  #[serde(flatten)]
  pub device: DeviceProperties,
  /// Wrapper script installed for binaries.
  #[serde(default)]
  pub wrapper: Option<String>,
  /// Prebuilt jars for import modules.
  #[serde(default)]
  pub jars: Vec<String>,
  /// Preprocessed aidl file exported by sdk prebuilts.
  #[serde(default)]
  pub aidl_preprocessed: Option<String>,
}

impl ModuleDecl {
  pub fn new(module_type: ModuleType, name: impl Into<String>) -> Self {
    Self {
      module_type,
      name: name.into(),
      dir: PathBuf::new(),
      defaults: Vec::new(),
      host_supported: false,
      compiler: CompilerProperties::default(),
      device: DeviceProperties::default(),
      wrapper: None,
      jars: Vec::new(),
      aidl_preprocessed: None,
    }
  }

  /// Names of type-specific properties set on a module type that ignores them.
  pub fn ignored_properties(&self) -> Vec<&'static str> {
    let kind = self.module_type.variant_kind();
    let mut ignored = Vec::new();
    if self.wrapper.is_some() && kind != VariantKind::Binary {
      ignored.push("wrapper");
    }
    if !self.jars.is_empty() && !matches!(kind, VariantKind::Import | VariantKind::SdkPrebuilt) {
      ignored.push("jars");
    }
    if self.aidl_preprocessed.is_some() && kind != VariantKind::SdkPrebuilt {
      ignored.push("aidl_preprocessed");
    }
    if self.host_supported && self.module_type.is_host_only() {
      ignored.push("host_supported");
    }
    ignored
  }
}

/// A blueprint file: platform settings plus module declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
  #[serde(default)]
  pub platform: crate::platform::PlatformConfig,
  #[serde(default)]
  pub modules: Vec<ModuleDecl>,
}
