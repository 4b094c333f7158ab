pub const CSS: &str = r"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--bg:#0F1420;--panel:#161D2E;--text:#E8ECF6;--muted:#9AA4BC;--primary:#5B8CFF;--ok:#3CCB8C;--err:#FF6B6B;--border:rgba(255,255,255,.08);--font:-apple-system,'Segoe UI',Inter,sans-serif}
body{font-family:var(--font);background:var(--bg);color:var(--text);line-height:1.6;-webkit-font-smoothing:antialiased}
a{color:inherit;text-decoration:none}
.sp-nav{display:flex;align-items:center;justify-content:space-between;max-width:1100px;margin:0 auto;padding:24px}
.sp-logo{font-size:20px;font-weight:800}
.sp-links{display:flex;align-items:center;gap:8px}
.sp-links a{color:var(--muted);font-size:14px;font-weight:600;padding:8px 14px;border-radius:50px}
.sp-links a:hover,.sp-links a.active{color:var(--text);background:rgba(255,255,255,.05)}
.sp-links .sp-pill{border:1px solid var(--border)}
.sp-btn{display:inline-flex;align-items:center;justify-content:center;padding:12px 26px;border-radius:50px;font-size:14px;font-weight:700;border:none;cursor:pointer}
.sp-btn-primary,.sp-links .sp-btn-primary{background:var(--primary);color:#fff}
.sp-btn[disabled]{opacity:.5;cursor:progress}
#main{max-width:1100px;margin:0 auto;padding:24px 24px 80px;min-height:60vh}
.sp-hero{text-align:center;max-width:780px;margin:0 auto;padding:80px 0 48px}
.sp-hero h1{font-size:52px;line-height:1.08;letter-spacing:-1.5px;margin-bottom:20px}
.sp-hero p{font-size:18px;color:var(--muted);margin-bottom:32px}
.sp-grid{display:grid;grid-template-columns:repeat(3,1fr);gap:18px}
.sp-card{background:var(--panel);border:1px solid var(--border);border-radius:16px;padding:28px}
.sp-card h3{font-size:16px;margin-bottom:8px}
.sp-card p{font-size:14px;color:var(--muted)}
.sp-prose{max-width:720px;margin:0 auto}
.sp-prose h1{font-size:36px;margin-bottom:16px}
.sp-prose h2{font-size:20px;margin:28px 0 8px}
.sp-prose p{color:var(--muted);margin-bottom:14px}
.sp-meta{font-size:13px;color:var(--muted);margin-bottom:24px}
.sp-form{max-width:760px;margin:0 auto;background:var(--panel);border:1px solid var(--border);border-radius:16px;padding:32px}
.sp-form fieldset{border:none;margin-bottom:24px}
.sp-form legend{font-weight:700;margin-bottom:12px}
.sp-row{display:grid;grid-template-columns:1fr 1fr;gap:14px}
.sp-field{display:flex;flex-direction:column;gap:6px;margin-bottom:14px;font-size:14px}
.sp-field input,.sp-field select,.sp-field textarea{background:var(--bg);color:var(--text);border:1px solid var(--border);border-radius:10px;padding:10px 12px;font:inherit}
.sp-check{display:flex;gap:10px;align-items:flex-start;font-size:14px;margin-bottom:10px}
.sp-check small{display:block;color:var(--muted)}
.sp-notice{border-radius:12px;padding:14px 18px;margin-bottom:20px;background:rgba(60,203,140,.12);border:1px solid rgba(60,203,140,.3)}
.sp-notice.error{background:rgba(255,107,107,.12);border-color:rgba(255,107,107,.3)}
.sp-footer{border-top:1px solid var(--border);max-width:1100px;margin:0 auto;padding:24px;display:flex;justify-content:space-between;font-size:13px;color:var(--muted)}
.sp-footer nav{display:flex;gap:16px}
@media(max-width:768px){.sp-hero h1{font-size:34px}.sp-grid,.sp-row{grid-template-columns:1fr}.sp-links a:not(.sp-btn){display:none}}
";
