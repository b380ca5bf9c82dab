//! Catalog of third-party apps whose handwriting rendering the device can
//! optimize, and the note-config fragment injected when the user asks for it.

use crate::statics;
use crate::value::{CfgNumber, CfgObject, CfgValue};

// App key -> fully qualified class name of the app's drawing view. The device
// hooks stylus input for that view. One legacy entry uses ':' instead of '_'
// as separator; it must stay spelled exactly like this.
const DRAW_VIEW_KEYS: &[(&str, &str)] = &[
    ("eac_app_md.obsidian", "com.getcapacitor.CapacitorWebView"),
    ("eac_app_com.xodo.pdf.reader", "com.pdftron.pdf.PDFViewCtrl"),
    ("eac_app_com.drawboard.pdf", "com.getcapacitor.CapacitorWebView"),
    (
        "eac_app_com.dragonnest.drawnote",
        "com.dragonnest.app.view.DrawingContainerView",
    ),
    (
        "eac_app:com.penly.penly",
        "com.penly.penly.editor.views.EditorView",
    ),
    (
        "eac_app_jp.ne.ibis.ibispaintx.app",
        "jp.ne.ibis.ibispaintx.app.glwtk.IbisPaintView",
    ),
    (
        "eac_app_net.cozic.joplin",
        "com.reactnativecommunity.webview.RNCWebView",
    ),
    (
        "eac_app_com.steadfastinnovation.android.projectpapyrus",
        "com.steadfastinnovation.android.projectpapyrus.ui.widget.PageViewContainer",
    ),
    (
        "eac_app_com.medibang.android.paint.tablet",
        "com.medibang.android.paint.tablet.ui.widget.CanvasView",
    ),
];

/// Whether the handwriting preset is available for this entry key.
pub fn is_recognized(key: &str) -> bool {
    DRAW_VIEW_KEYS.iter().any(|(k, _)| *k == key)
}

/// Draw-view class for the key, falling back to the generic placeholder for
/// apps without a specific mapping.
pub fn resolve_draw_view_key(key: &str) -> &'static str {
    DRAW_VIEW_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, view)| *view)
        .unwrap_or(statics::PRESET_DEFAULT_DRAW_VIEW_KEY)
}

/// Build a fresh `noteConfig` fragment for the given app key. Every call
/// returns an independent value; callers may mutate it freely.
pub fn build_preset(key: &str) -> CfgValue {
    let mut stroke = CfgObject::new();
    stroke.insert(
        statics::PRESET_FIELD_ENABLE.to_owned(),
        CfgValue::Bool(true),
    );
    // Opaque black in ARGB.
    stroke.insert(
        statics::PRESET_FIELD_STROKE_COLOR.to_owned(),
        CfgValue::Number(CfgNumber::I64(-16777216)),
    );
    stroke.insert(
        statics::PRESET_FIELD_STROKE_EXTRA_ARGS.to_owned(),
        CfgValue::Array(Vec::new()),
    );
    stroke.insert(
        statics::PRESET_FIELD_STROKE_PARAMS.to_owned(),
        CfgValue::Array(Vec::new()),
    );
    stroke.insert(
        statics::PRESET_FIELD_STROKE_STYLE.to_owned(),
        CfgValue::Number(CfgNumber::U64(1)),
    );
    stroke.insert(
        statics::PRESET_FIELD_STROKE_WIDTH.to_owned(),
        CfgValue::Number(CfgNumber::F64(1.75)),
    );

    let mut preset = CfgObject::new();
    preset.insert(
        statics::PRESET_FIELD_COMPATIBLE_VERSION_CODE.to_owned(),
        CfgValue::Number(CfgNumber::U64(0)),
    );
    preset.insert(
        statics::PRESET_FIELD_DRAW_VIEW_KEY.to_owned(),
        CfgValue::String(resolve_draw_view_key(key).to_owned()),
    );
    preset.insert(
        statics::PRESET_FIELD_ENABLE.to_owned(),
        CfgValue::Bool(true),
    );
    preset.insert(
        statics::PRESET_FIELD_GLOBAL_STROKE_STYLE.to_owned(),
        CfgValue::Object(stroke),
    );
    preset.insert(
        statics::PRESET_FIELD_REPAINT_LATENCY.to_owned(),
        CfgValue::Number(CfgNumber::U64(2000)),
    );
    preset.insert(
        statics::PRESET_FIELD_STYLE_MAP.to_owned(),
        CfgValue::empty_object(),
    );
    preset.insert(
        statics::PRESET_FIELD_SUPPORT_NOTE_CONFIG.to_owned(),
        CfgValue::Bool(true),
    );
    CfgValue::Object(preset)
}
