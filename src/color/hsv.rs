use super::ColorF;

/// Hue/saturation/value/alpha, every component normalized to `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsva {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

impl From<ColorF> for Hsva {
    fn from(c: ColorF) -> Self {
        let min = c.r.min(c.g).min(c.b);
        let max = c.r.max(c.g).max(c.b);
        let delta = max - min;

        if delta == 0.0 {
            // Achromatic
            return Self {
                h: 0.0,
                s: 0.0,
                v: max,
                a: c.a,
            };
        }

        let rd = ((max - c.r) / 6.0 + delta / 2.0) / delta;
        let gd = ((max - c.g) / 6.0 + delta / 2.0) / delta;
        let bd = ((max - c.b) / 6.0 + delta / 2.0) / delta;

        let mut h = if c.r == max {
            bd - gd
        } else if c.g == max {
            1.0 / 3.0 + rd - bd
        } else {
            2.0 / 3.0 + gd - rd
        };
        if h < 0.0 {
            h += 1.0;
        }
        if h > 1.0 {
            h -= 1.0;
        }

        Self {
            h,
            s: delta / max,
            v: max,
            a: c.a,
        }
    }
}

impl From<Hsva> for ColorF {
    fn from(hsv: Hsva) -> Self {
        let Hsva { h, s, v, a } = hsv;
        if s == 0.0 {
            return ColorF::new(v, v, v, a);
        }

        let mut h6 = h * 6.0;
        if h6 >= 6.0 {
            h6 = 0.0;
        }
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as i32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        ColorF::new(r, g, b, a)
    }
}
