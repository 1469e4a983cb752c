//! Dev launcher plugin
//!
//! Wires `expo-dev-launcher` into a bare Expo project: the Android activity
//! hands incoming intents to the launcher and wraps its React delegate, the
//! application initializes the launcher, and the Podfile pulls in
//! `expo-dev-menu` for debug builds on iOS 11+.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::edits::{insert_after_call, insert_before_unless, insert_block_after, replace_literal, rewrite_once};
use crate::error::{PatchError, Result};
use crate::imports::{inject_imports, SourceLanguage};
use crate::plugin::{ConfigPlugin, FileEdit, PatchTarget};
use crate::project::ProjectFile;

/// Component name warnings are tagged with
pub const COMPONENT: &str = "expo-dev-launcher";

pub const ANDROID_IMPORT: &str = "expo.modules.devlauncher.DevLauncherController";
pub const INTENT_IMPORT: &str = "android.content.Intent";

pub const ON_NEW_INTENT: &str = "
  @Override
  public void onNewIntent(Intent intent) {
      if (DevLauncherController.tryToHandleIntent(this, intent)) {
         return;
      }
      super.onNewIntent(intent);
  }
";

pub const WRAPPED_ACTIVITY_DELEGATE: &str =
    "DevLauncherController.wrapReactActivityDelegate(this, () -> ${1});";
const WRAPPED_DELEGATE_MARKER: &str = "DevLauncherController.wrapReactActivityDelegate";

pub const ANDROID_INIT: &str = "DevLauncherController.initialize(this, getReactNativeHost());";

pub const POD_IMPORT: &str =
    "pod 'expo-dev-menu', path: '../node_modules/expo-dev-menu', :configurations => :debug";

pub const IOS_PLATFORM_OLD: &str = "platform :ios, '10.0'";
pub const IOS_PLATFORM_NEW: &str = "platform :ios, '11.0'";

const ACTIVITY_CLASS: &str = "public class MainActivity";
const APPLICATION_ON_CREATE: &str = "super.onCreate()";
const PODFILE_MARKER: &str = "use_react_native";

// Group 1 ends at the anonymous class's closing brace; the `;` after it
// stays outside. `R` keeps `$` working on CRLF files.
static ACTIVITY_DELEGATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)(new ReactActivityDelegate(.*|\s)*\});$")
        .expect("invalid activity delegate regex")
});

// hash-rocket and Rubocop keyword forms of the same declaration
static POD_DECLARED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"pod ['"]expo-dev-menu['"],\s?path: ['"]\.\./node_modules/expo-dev-menu['"],\s?:?configurations:?\s(?:=>\s)?:debug"#,
    )
    .expect("invalid pod declaration regex")
});

/// Dev launcher config plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct DevLauncherPlugin;

impl DevLauncherPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigPlugin for DevLauncherPlugin {
    fn id(&self) -> &'static str {
        "dev-launcher"
    }

    fn component(&self) -> &'static str {
        COMPONENT
    }

    fn description(&self) -> &'static str {
        "Hook expo-dev-launcher into MainActivity, MainApplication and the Podfile"
    }

    fn edits(&self) -> Vec<FileEdit> {
        vec![
            FileEdit::new(PatchTarget::MainActivity, patch_main_activity),
            FileEdit::new(PatchTarget::MainApplication, patch_main_application),
            FileEdit::new(PatchTarget::Podfile, patch_podfile),
        ]
    }
}

fn ensure_java(file: &ProjectFile) -> Result<()> {
    match file.language() {
        SourceLanguage::Java => Ok(()),
        found => Err(PatchError::UnsupportedLanguage {
            path: file.path().to_path_buf(),
            expected: SourceLanguage::Java,
            found,
        }),
    }
}

/// Patch a `MainActivity.java`
pub fn patch_main_activity(file: &ProjectFile) -> Result<String> {
    ensure_java(file)?;
    Ok(apply_main_activity(file.contents()))
}

/// Activity edits on raw text
pub fn apply_main_activity(source: &str) -> String {
    let content = inject_imports(source, SourceLanguage::Java, &[ANDROID_IMPORT, INTENT_IMPORT]);
    let content = insert_block_after(&content, ACTIVITY_CLASS, ON_NEW_INTENT);
    rewrite_once(
        &content,
        &ACTIVITY_DELEGATE,
        WRAPPED_ACTIVITY_DELEGATE,
        WRAPPED_DELEGATE_MARKER,
    )
}

/// Patch a `MainApplication.java`
pub fn patch_main_application(file: &ProjectFile) -> Result<String> {
    ensure_java(file)?;
    Ok(apply_main_application(file.contents()))
}

/// Application edits on raw text
pub fn apply_main_application(source: &str) -> String {
    let content = inject_imports(source, SourceLanguage::Java, &[ANDROID_IMPORT]);
    insert_after_call(&content, APPLICATION_ON_CREATE, &format!("    {}", ANDROID_INIT))
}

/// Patch a `Podfile`
pub fn patch_podfile(file: &ProjectFile) -> Result<String> {
    Ok(apply_podfile(file.contents()))
}

/// Podfile edits on raw text
pub fn apply_podfile(source: &str) -> String {
    let content = replace_literal(source, IOS_PLATFORM_OLD, IOS_PLATFORM_NEW);
    insert_before_unless(&content, &POD_DECLARED, PODFILE_MARKER, &format!("  {}", POD_IMPORT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::Platform;

    const MAIN_ACTIVITY: &str = r#"package com.example.app;

import android.os.Bundle;

import com.facebook.react.ReactActivity;
import com.facebook.react.ReactActivityDelegate;
import com.facebook.react.ReactRootView;
import com.swmansion.gesturehandler.react.RNGestureHandlerEnabledRootView;

import expo.modules.splashscreen.singletons.SplashScreen;
import expo.modules.splashscreen.SplashScreenImageResizeMode;

public class MainActivity extends ReactActivity {
    @Override
    protected void onCreate(Bundle savedInstanceState) {
        super.onCreate(null);
        // SplashScreen.show(...) has to be called after super.onCreate(...)
        SplashScreen.show(this, SplashScreenImageResizeMode.CONTAIN, ReactRootView.class, false);
    }

    /**
     * Returns the name of the main component registered from JavaScript.
     * This is used to schedule rendering of the component.
     */
    @Override
    protected String getMainComponentName() {
        return "main";
    }

    @Override
    protected ReactActivityDelegate createReactActivityDelegate() {
        return new ReactActivityDelegate(this, getMainComponentName()) {
            @Override
            protected ReactRootView createRootView() {
                return new RNGestureHandlerEnabledRootView(MainActivity.this);
            }
        };
    }
}
"#;

    const WRAPPED_DELEGATE: &str = r#"        return DevLauncherController.wrapReactActivityDelegate(this, () -> new ReactActivityDelegate(this, getMainComponentName()) {
            @Override
            protected ReactRootView createRootView() {
                return new RNGestureHandlerEnabledRootView(MainActivity.this);
            }
        });
    }
}
"#;

    const MAIN_APPLICATION: &str = r#"package com.example.app;

import android.app.Application;

public class MainApplication extends Application implements ReactApplication {
  @Override
  public void onCreate() {
    super.onCreate();
    SoLoader.init(this, /* native exopackage */ false);
  }
}
"#;

    const PODFILE: &str = r#"require_relative '../node_modules/react-native/scripts/react_native_pods'

platform :ios, '10.0'

target 'example' do
  use_unimodules!
  config = use_native_modules!

  use_react_native!(:path => config["reactNativePath"])
end
"#;

    #[test]
    fn test_main_activity_imports() {
        let result = apply_main_activity(MAIN_ACTIVITY);
        assert!(result.starts_with(
            "package com.example.app;\nimport expo.modules.devlauncher.DevLauncherController;\nimport android.content.Intent;\n"
        ));
    }

    #[test]
    fn test_main_activity_on_new_intent_after_class() {
        let result = apply_main_activity(MAIN_ACTIVITY);
        let expected = format!("public class MainActivity extends ReactActivity {{\n{}\n", ON_NEW_INTENT);
        assert!(result.contains(&expected));
        assert_eq!(result.matches("public void onNewIntent").count(), 1);
    }

    #[test]
    fn test_main_activity_delegate_wrapped() {
        let result = apply_main_activity(MAIN_ACTIVITY);
        assert!(result.ends_with(WRAPPED_DELEGATE), "got:\n{}", result);
        assert_eq!(result.matches('(').count(), result.matches(')').count());
        assert!(!result.contains("        };\n"));
    }

    #[test]
    fn test_main_activity_delegate_wrapped_crlf() {
        let source = MAIN_ACTIVITY.replace('\n', "\r\n");
        let result = apply_main_activity(&source);
        assert!(result.ends_with(&WRAPPED_DELEGATE.replace('\n', "\r\n")));
        assert!(!result.contains("\r\r"));
        assert!(!result.replace("\r\n", "").contains('\n'));
        assert_eq!(apply_main_activity(&result), result);
    }

    #[test]
    fn test_main_activity_nested_call_stays_balanced() {
        let source = "public class MainActivity extends ReactActivity {\n    protected ReactActivityDelegate createReactActivityDelegate() {\n        return createDelegate(new ReactActivityDelegate(this, getMainComponentName()) {\n        });\n    }\n}\n";
        let result = apply_main_activity(source);
        assert_eq!(result.matches('(').count(), result.matches(')').count());
    }

    #[test]
    fn test_main_activity_idempotent() {
        let once = apply_main_activity(MAIN_ACTIVITY);
        assert_eq!(apply_main_activity(&once), once);
    }

    #[test]
    fn test_main_activity_without_delegate() {
        let source = "package com.example.app;\n\npublic class MainActivity extends ReactActivity {\n}\n";
        let result = apply_main_activity(source);
        assert!(result.contains("public void onNewIntent"));
        assert!(!result.contains(WRAPPED_DELEGATE_MARKER));
    }

    #[test]
    fn test_kotlin_activity_rejected() {
        let file = ProjectFile::from_contents(
            "android/app/src/main/java/com/example/app/MainActivity.kt",
            Platform::Android,
            "package com.example.app\n\nclass MainActivity : ReactActivity()",
        );
        let err = patch_main_activity(&file).unwrap_err();
        assert!(err.is_malformed_source());
    }

    #[test]
    fn test_main_application_init_after_super() {
        let result = apply_main_application(MAIN_APPLICATION);
        assert!(result.contains(
            "    super.onCreate();\n    DevLauncherController.initialize(this, getReactNativeHost());\n    SoLoader.init"
        ));
        assert!(result.contains("import expo.modules.devlauncher.DevLauncherController;"));
        assert_eq!(apply_main_application(&result), result);
    }

    #[test]
    fn test_podfile_version_bump_and_pod() {
        let result = apply_podfile(PODFILE);
        assert!(result.contains("platform :ios, '11.0'"));
        assert!(!result.contains("platform :ios, '10.0'"));
        assert!(result.contains(&format!(
            "  {}\n  use_react_native!(:path => config[\"reactNativePath\"])",
            POD_IMPORT
        )));
    }

    #[test]
    fn test_podfile_idempotent() {
        let once = apply_podfile(PODFILE);
        assert_eq!(apply_podfile(&once), once);
    }

    #[test]
    fn test_podfile_rubocop_form_not_duplicated() {
        let podfile = PODFILE.replace(
            "  use_unimodules!",
            "  pod \"expo-dev-menu\", path: \"../node_modules/expo-dev-menu\", configurations: :debug\n  use_unimodules!",
        );
        let result = apply_podfile(&podfile);
        assert_eq!(result.matches("expo-dev-menu\", path").count(), 1);
        assert!(!result.contains(POD_IMPORT));
    }

    #[test]
    fn test_podfile_newer_platform_untouched() {
        let podfile = PODFILE.replace("'10.0'", "'12.0'");
        let result = apply_podfile(&podfile);
        assert!(result.contains("platform :ios, '12.0'"));
    }

    #[test]
    fn test_plugin_edits_order() {
        let targets: Vec<_> = DevLauncherPlugin::new().edits().iter().map(|e| e.target).collect();
        assert_eq!(
            targets,
            vec![PatchTarget::MainActivity, PatchTarget::MainApplication, PatchTarget::Podfile]
        );
    }
}
