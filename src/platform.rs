use crate::{
    desktop::{SettingsStore, WallpaperNotifier},
    error::Result,
    resolution::DisplayBounds,
};

/// The OS hooks the pipeline needs: display size, settings store, reload call.
pub struct DesktopIntegration {
    pub display: Box<dyn DisplayBounds>,
    pub store: Box<dyn SettingsStore>,
    pub notifier: Box<dyn WallpaperNotifier>,
}

#[cfg(windows)]
pub fn desktop_integration() -> Result<DesktopIntegration> {
    win32::enable_per_monitor_dpi_awareness();
    Ok(DesktopIntegration {
        display: Box::new(win32::PrimaryDisplay),
        store: Box::new(win32::RegistryStore),
        notifier: Box::new(win32::SpiNotifier),
    })
}

#[cfg(not(windows))]
pub fn desktop_integration() -> Result<DesktopIntegration> {
    Err(crate::error::AppError::Unsupported)
}

#[cfg(windows)]
mod win32 {
    use std::{ffi::c_void, path::Path};

    use windows::{
        core::{w, PCWSTR},
        Win32::{
            Foundation::ERROR_SUCCESS,
            System::Registry::{
                RegCloseKey, RegOpenKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_SET_VALUE,
                REG_SZ,
            },
            UI::HiDpi::{SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2},
            UI::WindowsAndMessaging::{
                GetSystemMetrics, SystemParametersInfoW, SM_CXSCREEN, SM_CYSCREEN,
                SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SPI_SETDESKWALLPAPER,
            },
        },
    };

    use crate::{
        desktop::{SettingsStore, WallpaperNotifier},
        error::{AppError, Result},
        resolution::{DisplayBounds, Resolution},
        utility::{to_wstring, wide_bytes},
        warn,
    };

    const DESKTOP_KEY: PCWSTR = w!("Control Panel\\Desktop");

    pub fn enable_per_monitor_dpi_awareness() {
        unsafe {
            if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_err() {
                warn!(
                    "Failed to set process DPI awareness to PerMonitorV2; screen size may be scaled"
                );
            }
        }
    }

    pub struct PrimaryDisplay;

    impl DisplayBounds for PrimaryDisplay {
        fn primary_resolution(&self) -> Resolution {
            let (width, height) =
                unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
            Resolution::new(width.max(0) as u32, height.max(0) as u32)
        }
    }

    /// Open registry key, closed on drop.
    struct KeyGuard(HKEY);

    impl Drop for KeyGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    pub struct RegistryStore;

    impl SettingsStore for RegistryStore {
        fn write_values(&mut self, values: &[(&str, String)]) -> Result<()> {
            let key = unsafe {
                let mut hkey = HKEY::default();
                let status = RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    DESKTOP_KEY,
                    Some(0),
                    KEY_SET_VALUE,
                    &mut hkey,
                );
                if status != ERROR_SUCCESS {
                    return Err(AppError::Permission(format!(
                        "RegOpenKeyExW(HKCU\\Control Panel\\Desktop) failed: {:?}",
                        status
                    )));
                }
                KeyGuard(hkey)
            };

            for (name, value) in values {
                let name_wide = to_wstring(name);
                let data = wide_bytes(&to_wstring(value));
                let status = unsafe {
                    RegSetValueExW(key.0, PCWSTR(name_wide.as_ptr()), None, REG_SZ, Some(&data))
                };
                if status != ERROR_SUCCESS {
                    return Err(AppError::Permission(format!(
                        "RegSetValueExW({name}) failed: {:?}",
                        status
                    )));
                }
            }

            Ok(())
        }
    }

    pub struct SpiNotifier;

    impl WallpaperNotifier for SpiNotifier {
        fn notify(&self, path: &Path) -> Result<()> {
            let mut wide = to_wstring(path);
            unsafe {
                SystemParametersInfoW(
                    SPI_SETDESKWALLPAPER,
                    0,
                    Some(wide.as_mut_ptr() as *mut c_void),
                    SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
                )
            }
            .map_err(|e| AppError::Notify(format!("SystemParametersInfoW failed: {e}")))
        }
    }
}
