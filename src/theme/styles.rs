//! Global CSS for the quest board.
//!
//! Quest type colors match `QuestType::color`; narrative tones get a left
//! border each.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* Paper */
  --paper: #f6f1e7;
  --paper-raised: #fffaf0;
  --ink: #2b2622;
  --ink-soft: rgba(43, 38, 34, 0.7);
  --ink-muted: rgba(43, 38, 34, 0.5);
  --rule: #ddd2c0;

  /* Quest types */
  --agency: #6b8e9f;
  --courage: #d4a574;
  --order: #8b6f7e;

  /* Narrative tones */
  --tone-calm: #8fa99b;
  --tone-warm: #d4a574;
  --tone-firm: #7a5c58;

  --danger: #b4533c;

  --font-serif: 'Iowan Old Style', Georgia, serif;
  --font-sans: -apple-system, 'Segoe UI', sans-serif;

  --radius: 10px;
  --transition-fast: 150ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  background: var(--paper);
  color: var(--ink);
  font-family: var(--font-sans);
  line-height: 1.5;
}

/* === Shell === */
.app-shell {
  max-width: 520px;
  margin: 0 auto;
  padding: 1.5rem 1rem 3rem;
}

.app-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 1.5rem;
}

.app-title {
  font-family: var(--font-serif);
  font-size: 2rem;
  font-weight: 600;
}

.player-stats {
  display: flex;
  gap: 0.75rem;
  font-size: 0.85rem;
}

.player-stat {
  display: flex;
  align-items: baseline;
  gap: 0.25rem;
}

.player-stat-label {
  font-weight: 600;
}

.player-stat-value {
  font-variant-numeric: tabular-nums;
}

.app-main {
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.section-title {
  font-family: var(--font-serif);
  font-size: 1.25rem;
  margin-bottom: 0.75rem;
}

.loading-state,
.empty-state {
  text-align: center;
  color: var(--ink-muted);
  padding: 2rem 0;
}

/* === Error Banner === */
.error-banner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 1rem;
  padding: 0.75rem 1rem;
  border: 1px solid var(--danger);
  border-radius: var(--radius);
  color: var(--danger);
  background: rgba(180, 83, 60, 0.06);
}

.error-dismiss {
  background: none;
  border: none;
  color: inherit;
  text-decoration: underline;
  cursor: pointer;
}

/* === Buttons === */
.btn-primary,
.btn-secondary,
.btn-ghost {
  font: inherit;
  cursor: pointer;
  border-radius: var(--radius);
  padding: 0.5rem 1.1rem;
  transition: opacity var(--transition-fast), background var(--transition-fast);
}

.btn-primary {
  background: var(--ink);
  color: var(--paper-raised);
  border: 1px solid var(--ink);
}

.btn-secondary {
  background: transparent;
  color: var(--ink);
  border: 1px solid var(--rule);
}

.btn-ghost {
  background: none;
  border: none;
  color: var(--ink-soft);
  padding: 0.25rem 0.5rem;
}

.btn-ghost:hover {
  color: var(--ink);
}

button:disabled {
  opacity: 0.45;
  cursor: not-allowed;
}

.icon-btn {
  background: none;
  border: none;
  font-size: 1.4rem;
  line-height: 1;
  color: var(--ink-muted);
  cursor: pointer;
}

.copy-btn {
  font: inherit;
  font-size: 0.85rem;
  background: none;
  border: 1px solid var(--rule);
  border-radius: var(--radius);
  padding: 0.3rem 0.75rem;
  cursor: pointer;
}

.copy-btn.copied {
  border-color: var(--tone-calm);
  color: var(--tone-calm);
}

/* === Type Badge === */
.type-badge {
  display: inline-block;
  font-size: 0.75rem;
  font-weight: 600;
  letter-spacing: 0.05em;
  text-transform: uppercase;
  color: #fff;
  padding: 0.15rem 0.6rem;
  border-radius: 999px;
}

/* === Cards === */
.quest-card,
.active-quest-panel,
.receipt-card {
  background: var(--paper-raised);
  border: 1px solid var(--rule);
  border-radius: var(--radius);
  padding: 1rem 1.25rem;
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
}

.quest-list {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
}

.quest-context {
  font-family: var(--font-serif);
  font-size: 1.05rem;
}

.quest-action,
.quest-constraint {
  font-size: 0.95rem;
}

.quest-reflection {
  color: var(--ink-soft);
}

.active-quest-panel {
  border-width: 2px;
  border-color: var(--ink);
}

.active-quest-header {
  display: flex;
  align-items: center;
  gap: 0.75rem;
}

.active-quest-header .section-title {
  margin-bottom: 0;
}

.active-quest-actions,
.receipt-actions {
  display: flex;
  gap: 0.5rem;
  flex-wrap: wrap;
}

/* === Record Action Form === */
.record-action-form {
  display: flex;
  flex-direction: column;
  gap: 0.4rem;
  border-top: 1px dashed var(--rule);
  padding-top: 0.75rem;
}

.record-action-label {
  font-size: 0.85rem;
  color: var(--ink-soft);
}

.record-action-input {
  font: inherit;
  border: 1px solid var(--rule);
  border-radius: var(--radius);
  padding: 0.5rem;
  resize: vertical;
  background: var(--paper);
}

/* === Narrative === */
.narrative-box {
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  gap: 1rem;
  padding: 1rem 1.25rem;
  border-left: 4px solid var(--tone-calm);
  background: var(--paper-raised);
  border-radius: 0 var(--radius) var(--radius) 0;
}

.narrative-warm { border-left-color: var(--tone-warm); }
.narrative-firm { border-left-color: var(--tone-firm); }

.narrative-title {
  font-family: var(--font-serif);
  font-size: 1.2rem;
}

.narrative-line {
  font-family: var(--font-serif);
  font-style: italic;
}

/* === Receipt Card === */
.receipt-card { border-left: 4px solid var(--tone-calm); }
.receipt-warm { border-left-color: var(--tone-warm); }
.receipt-firm { border-left-color: var(--tone-firm); }

.receipt-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.receipt-title {
  font-family: var(--font-serif);
  font-size: 1.3rem;
}

.receipt-share {
  background: var(--paper);
  border-radius: var(--radius);
  padding: 0.6rem 0.8rem;
  font-size: 0.9rem;
}

.receipt-action {
  font-size: 0.9rem;
  color: var(--ink-soft);
}

.receipt-share-link {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  font-size: 0.8rem;
  word-break: break-all;
}

/* === Receipts Drawer === */
.drawer-overlay {
  position: fixed;
  inset: 0;
  background: rgba(43, 38, 34, 0.35);
  display: flex;
  justify-content: flex-end;
}

.receipts-drawer {
  width: min(420px, 92vw);
  height: 100%;
  background: var(--paper);
  display: flex;
  flex-direction: column;
  box-shadow: -4px 0 16px rgba(0, 0, 0, 0.12);
}

.drawer-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 1rem 1.25rem;
  border-bottom: 1px solid var(--rule);
}

.drawer-title {
  font-family: var(--font-serif);
}

.drawer-content {
  overflow-y: auto;
  padding: 1rem 1.25rem;
  flex: 1;
}

.drawer-loading,
.drawer-empty {
  color: var(--ink-muted);
  text-align: center;
  padding: 2rem 0;
}

.drawer-error {
  color: var(--danger);
}

.drawer-list {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}

.drawer-item {
  background: var(--paper-raised);
  border: 1px solid var(--rule);
  border-radius: var(--radius);
}

.drawer-item-header {
  display: flex;
  gap: 0.75rem;
  align-items: flex-start;
  padding: 0.75rem;
  cursor: pointer;
}

.drawer-item-info {
  flex: 1;
}

.drawer-item-title {
  font-size: 1rem;
}

.drawer-item-line {
  font-size: 0.85rem;
  color: var(--ink-soft);
}

.drawer-item-date {
  font-size: 0.75rem;
  color: var(--ink-muted);
  white-space: nowrap;
}

.drawer-item-expanded {
  border-top: 1px dashed var(--rule);
  padding: 0.75rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  font-size: 0.9rem;
}

.drawer-item-action-label {
  font-weight: 600;
  font-size: 0.8rem;
}
"#;
