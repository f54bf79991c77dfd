//! Optional decorative extras: card tilt, click bursts, parallax
//! decorations, the Konami code, seasonal showers and toasts.
//!
//! All of them are skipped under reduced motion except the toast.

pub mod burst;
pub mod konami;
pub mod parallax;
pub mod seasonal;
pub mod tilt;
pub mod toast;

pub use toast::show_toast;

/// Styles for the elements these flourishes create.
pub const FLOURISH_STYLES: &str = r#"
@keyframes effects-burst {
	0% { transform: translate(0, 0) scale(1); opacity: 1; }
	100% { transform: translate(var(--dx), var(--dy)) scale(0); opacity: 0; }
}
@keyframes effects-fall {
	0% { transform: translateY(-10vh) rotate(0deg); opacity: 1; }
	100% { transform: translateY(110vh) rotate(360deg); opacity: 0.6; }
}
.effects-burst {
	position: fixed;
	width: 4px;
	height: 4px;
	border-radius: 50%;
	pointer-events: none;
	z-index: 9999;
	animation: effects-burst 0.8s ease-out forwards;
}
.effects-shower-drop {
	position: fixed;
	top: 0;
	font-size: 1.5rem;
	pointer-events: none;
	z-index: 9998;
	animation-name: effects-fall;
	animation-timing-function: linear;
	animation-fill-mode: forwards;
}
.effects-toast {
	position: fixed;
	top: 20px;
	right: 20px;
	background: linear-gradient(135deg, #50c878, #8bc34a);
	color: #0d1b0f;
	padding: 1rem 2rem;
	border-radius: 10px;
	font-weight: 600;
	z-index: 10000;
	transform: translateX(120%);
	transition: transform 0.5s ease;
}
.effects-toast.visible {
	transform: translateX(0);
}
"#;
